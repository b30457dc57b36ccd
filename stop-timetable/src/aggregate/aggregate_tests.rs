//! Unit tests for timetable aggregation over the schedule bundle.

use super::*;
use crate::archive::{MemoryContainer, test_zip};
use crate::catalogue::{DatasetId, Locality};
use crate::domain::{ClockTime, LocalityId};

const LOCALITY: &str = "E0057917";

fn t(s: &str) -> ClockTime {
    ClockTime::parse_hms(s).unwrap()
}

fn target(code: &str) -> StopIdentity {
    StopIdentity::new(
        StopCode::parse(code).unwrap(),
        LocalityId::parse(LOCALITY).unwrap(),
    )
}

fn entry(
    id: u64,
    operator: &str,
    lines: &[&str],
    extension: &str,
    locality: &str,
) -> CatalogueEntry {
    CatalogueEntry {
        id: Some(DatasetId::Number(id)),
        operator_name: Some(operator.to_string()),
        lines: Some(lines.iter().map(|l| l.to_string()).collect()),
        extension: Some(extension.to_string()),
        localities: Some(vec![Locality {
            gazetteer_id: Some(locality.to_string()),
            locality_name: Some("Redhill".to_string()),
        }]),
    }
}

/// A document with one journey over one section of (from, to, run) links.
fn doc(line: &str, departure: &str, destination: &str, links: &[(&str, &str, &str)]) -> Vec<u8> {
    let links: String = links
        .iter()
        .enumerate()
        .map(|(i, (from, to, run))| {
            format!(
                r#"<JourneyPatternTimingLink id="L{i}">
                    <From><StopPointRef>{from}</StopPointRef></From>
                    <To><StopPointRef>{to}</StopPointRef></To>
                    <RunTime>{run}</RunTime>
                </JourneyPatternTimingLink>"#
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<TransXChange xmlns="http://www.transxchange.org.uk/">
  <JourneyPatternSections>
    <JourneyPatternSection id="S1">{links}</JourneyPatternSection>
  </JourneyPatternSections>
  <Services><Service>
    <Lines><Line id="LN"><LineName>{line}</LineName></Line></Lines>
    <StandardService>
      <JourneyPattern id="JP1">
        <DestinationDisplay>{destination}</DestinationDisplay>
        <JourneyPatternSectionRefs>S1</JourneyPatternSectionRefs>
      </JourneyPattern>
    </StandardService>
  </Service></Services>
  <VehicleJourneys>
    <VehicleJourney>
      <DepartureTime>{departure}</DepartureTime>
      <JourneyPatternRef>JP1</JourneyPatternRef>
    </VehicleJourney>
  </VehicleJourneys>
</TransXChange>"#
    )
    .into_bytes()
}

#[test]
fn flat_document_calling_at_stop() {
    let catalogue = vec![entry(7, "XYZ", &["3"], "xml", LOCALITY)];
    let bundle = test_zip(&[(
        "XYZ_7_3.xml",
        &doc("3", "09:00:00", "Reigate", &[("A", "B", "PT4M")]),
    )]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line, "3");
    assert_eq!(entries[0].arrival_times.get("Reigate").unwrap(), &[t("09:04:00")]);
}

#[test]
fn flat_document_not_calling_at_stop() {
    let catalogue = vec![entry(7, "XYZ", &["3"], "xml", LOCALITY)];
    let bundle = test_zip(&[(
        "XYZ_7_3.xml",
        &doc("3", "09:00:00", "Reigate", &[("A", "C", "PT4M")]),
    )]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn archive_skips_empty_copy_of_line_and_keeps_matching_one() {
    // Listed order: new then old. Scanned in reverse, so the old copy
    // (which misses the stop) is read first and must not claim line 12.
    let new = doc("12", "08:00:00", "Guildford", &[("A", "B", "PT5M")]);
    let old = doc("12", "07:00:00", "Guildford", &[("A", "C", "PT5M")]);
    let nested = test_zip(&[("12_new.xml", &new), ("12_old.xml", &old)]);

    let catalogue = vec![entry(12, "ABC", &["12"], "zip", LOCALITY)];
    let bundle = test_zip(&[("ABC_12.zip", &nested)]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line, "12");
    assert_eq!(entries[0].arrival_times.get("Guildford").unwrap(), &[t("08:05:00")]);
}

#[test]
fn archive_takes_one_document_per_line() {
    let first = doc("12", "08:00:00", "Guildford", &[("A", "B", "PT5M")]);
    let last = doc("12", "10:00:00", "Guildford", &[("A", "B", "PT5M")]);
    let nested = test_zip(&[("12_a.xml", &first), ("12_b.xml", &last)]);

    let catalogue = vec![entry(12, "ABC", &["12"], "zip", LOCALITY)];
    let bundle = test_zip(&[("ABC_12.zip", &nested)]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    assert_eq!(entries.len(), 1);
    // Last listed is scanned first
    assert_eq!(entries[0].arrival_times.get("Guildford").unwrap(), &[t("10:05:00")]);
}

#[test]
fn matched_line_is_not_extracted_again() {
    let mut nested = MemoryContainer::new()
        .with_entry("12_a.xml", doc("12", "07:00:00", "Guildford", &[("A", "B", "PT5M")]))
        .with_entry("13.xml", doc("13", "08:30:00", "Dorking", &[("B", "D", "PT2M")]))
        .with_entry("12_c.xml", doc("12", "10:00:00", "Guildford", &[("A", "B", "PT5M")]))
        .with_entry("12_b.xml", doc("12", "08:00:00", "Guildford", &[("A", "C", "PT5M")]));
    let stop = StopCode::parse("B").unwrap();

    let mut extracted = Vec::new();
    let entries = scan_archive_with(&mut nested, "ABC_12.zip", &stop, |document, stop| {
        extracted.push(document.line_name().unwrap());
        document.extract(stop)
    });

    // Scanned 12_b, 12_c, 13, 12_a. 12_b misses the stop so line 12 stays
    // open for 12_c; after that 12_a is only read for its line name.
    assert_eq!(extracted, vec!["12", "12", "13"]);
    assert_eq!(nested.read_count("12_a.xml"), 1);

    let lines: Vec<&str> = entries.iter().map(|e| e.line.as_str()).collect();
    assert_eq!(lines, vec!["12", "13"]);
    assert_eq!(entries[0].arrival_times.get("Guildford").unwrap(), &[t("10:05:00")]);
}

#[test]
fn archive_yields_one_entry_per_distinct_line() {
    let twelve = doc("12", "08:00:00", "Guildford", &[("A", "B", "PT5M")]);
    let thirteen = doc("13", "08:30:00", "Dorking", &[("B", "D", "PT2M")]);
    let nested = test_zip(&[("12.xml", &twelve), ("13.xml", &thirteen)]);

    let catalogue = vec![entry(12, "ABC", &["12", "13"], "zip", LOCALITY)];
    let bundle = test_zip(&[("ABC_12.zip", &nested)]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    let lines: Vec<&str> = entries.iter().map(|e| e.line.as_str()).collect();
    assert_eq!(lines, vec!["13", "12"]);
    assert_eq!(entries[0].arrival_times.get("Dorking").unwrap(), &[t("08:32:00")]);
}

#[test]
fn malformed_document_does_not_stop_the_scan() {
    let good = doc("12", "08:00:00", "Guildford", &[("A", "B", "PT5M")]);
    let nested = test_zip(&[("12.xml", &good), ("broken.xml", b"<TransXChange><oops")]);

    let catalogue = vec![entry(12, "ABC", &["12"], "zip", LOCALITY)];
    let bundle = test_zip(&[("ABC_12.zip", &nested)]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line, "12");
}

#[test]
fn missing_flat_file_is_skipped() {
    let catalogue = vec![
        entry(1, "XYZ", &["3"], "xml", LOCALITY),
        entry(2, "XYZ", &["4"], "xml", LOCALITY),
    ];
    // Only line 4's document was stored
    let bundle = test_zip(&[(
        "XYZ_2_4.xml",
        &doc("4", "11:00:00", "Merstham", &[("A", "B", "PT1M")]),
    )]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line, "4");
}

#[test]
fn nested_archive_that_is_not_a_zip_is_skipped() {
    let catalogue = vec![
        entry(1, "ABC", &["12"], "zip", LOCALITY),
        entry(2, "XYZ", &["3"], "xml", LOCALITY),
    ];
    let bundle = test_zip(&[
        ("ABC_1.zip", b"not a zip"),
        ("XYZ_2_3.xml", &doc("3", "09:00:00", "Reigate", &[("A", "B", "PT4M")])),
    ]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line, "3");
}

#[test]
fn flat_entries_precede_archive_entries() {
    let twelve = doc("12", "08:00:00", "Guildford", &[("A", "B", "PT5M")]);
    let nested = test_zip(&[("12.xml", &twelve)]);
    // Archive listed last in the catalogue, so selected first
    let catalogue = vec![
        entry(2, "XYZ", &["3"], "xml", LOCALITY),
        entry(1, "ABC", &["12"], "zip", LOCALITY),
    ];
    let bundle = test_zip(&[
        ("ABC_1.zip", &nested),
        ("XYZ_2_3.xml", &doc("3", "09:00:00", "Reigate", &[("A", "B", "PT4M")])),
    ]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    let lines: Vec<&str> = entries.iter().map(|e| e.line.as_str()).collect();
    assert_eq!(lines, vec!["3", "12"]);
}

#[test]
fn other_locality_yields_nothing() {
    let catalogue = vec![entry(7, "XYZ", &["3"], "xml", "E0000001")];
    let bundle = test_zip(&[(
        "XYZ_7_3.xml",
        &doc("3", "09:00:00", "Reigate", &[("A", "B", "PT4M")]),
    )]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn unreadable_outer_container_is_an_error() {
    let catalogue = vec![entry(7, "XYZ", &["3"], "xml", LOCALITY)];
    let result = build_timetable(b"garbage".to_vec(), &target("B"), &catalogue);
    assert!(matches!(result, Err(ArchiveError::Zip(_))));
}

#[test]
fn superseded_dataset_is_never_read() {
    // Same operator and lines twice: only the later catalogue entry counts.
    let catalogue = vec![
        entry(1, "XYZ", &["3"], "xml", LOCALITY),
        entry(2, "XYZ", &["3"], "xml", LOCALITY),
    ];
    let mut container = MemoryContainer::new()
        .with_entry("XYZ_1_3.xml", doc("3", "06:00:00", "Reigate", &[("A", "B", "PT4M")]))
        .with_entry("XYZ_2_3.xml", doc("3", "09:00:00", "Reigate", &[("A", "B", "PT4M")]));

    let entries = build_timetable_from(&mut container, &target("B"), &catalogue);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].arrival_times.get("Reigate").unwrap(), &[t("09:04:00")]);
    assert_eq!(container.read_count("XYZ_1_3.xml"), 0);
    assert_eq!(container.read_count("XYZ_2_3.xml"), 1);
}

#[test]
fn rebuilding_gives_the_same_timetable() {
    let nested = test_zip(&[
        ("12.xml", &doc("12", "08:00:00", "Guildford", &[("A", "B", "PT5M")])),
        ("13.xml", &doc("13", "08:30:00", "Dorking", &[("B", "D", "PT2M")])),
    ]);
    let catalogue = vec![
        entry(1, "ABC", &["12", "13"], "zip", LOCALITY),
        entry(2, "XYZ", &["3"], "xml", LOCALITY),
    ];
    let bundle = test_zip(&[
        ("ABC_1.zip", &nested),
        ("XYZ_2_3.xml", &doc("3", "09:00:00", "Reigate", &[("A", "B", "PT4M")])),
    ]);

    let first = build_timetable(bundle.clone(), &target("B"), &catalogue).unwrap();
    let second = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn document_with_unresolved_section_is_skipped() {
    let broken = String::from_utf8(doc("13", "08:00:00", "Dorking", &[("A", "B", "PT5M")]))
        .unwrap()
        .replace(
            "<JourneyPatternSectionRefs>S1<",
            "<JourneyPatternSectionRefs>S9<",
        );
    let good = doc("12", "08:00:00", "Guildford", &[("A", "B", "PT5M")]);
    let nested = test_zip(&[("12.xml", &good), ("13.xml", broken.as_bytes())]);

    let catalogue = vec![entry(12, "ABC", &["12", "13"], "zip", LOCALITY)];
    let bundle = test_zip(&[("ABC_12.zip", &nested)]);

    let entries = build_timetable(bundle, &target("B"), &catalogue).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line, "12");
}
