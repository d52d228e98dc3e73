//! End-to-end tests for the analysis pipeline.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use exi_cli::pipeline::{analyse, is_missing_input, run_pipeline};
use exi_cli::types::{PipelineOptions, RunConfig, StageCounts};
use exi_model::Measure;

const ROOM_ONE: &str = "\
OGP,Tube kV,mAs,DAP (cGycm2),Clin. EXI,Collimation,SID,Dose (uGy),SOP Instance UID
 Hand,52,1.5,0.5,(!) 310,18x24,110,,1.1
Hand,56,2.5,1.5,290,18x24,110,,1.2
Thorax pa,125,1.6,0,250,35x43,180,,1.3
";

const ROOM_TWO: &str = "\
OGP,kV,mAs (total),DAP,Clinical EXI,Collimation (cm),SID,Dose,SOP Instance UID
Hand,60,2.2,1.2,300,18x24,110,0.5,1.2
*Thorax pa,125,1.8,5.0,260,35x43,180,2.5,1.4
\"Knee, left\",63,4.0,2.0,200,24x30,110,,1.5
";

fn write_exports(dir: &Path) {
    fs::write(dir.join("a_room1.csv"), ROOM_ONE).unwrap();
    fs::write(dir.join("b_room2.csv"), ROOM_TWO).unwrap();
}

#[test]
fn two_rooms_produce_cleaned_medians() {
    let input = TempDir::new().unwrap();
    write_exports(input.path());
    let output = TempDir::new().unwrap();
    let config = RunConfig {
        input_dir: input.path().to_path_buf(),
        output_file: output.path().join("medians.csv"),
    };

    let result = run_pipeline(&config, &PipelineOptions::default()).unwrap();

    assert_eq!(
        result.analysis.counts,
        StageCounts {
            files_read: 2,
            rows_loaded: 6,
            comma_rows_removed: 1,
            duplicate_rows_removed: 1,
            zero_dap_rows_removed: 1,
            malformed_collimation: 0,
            rows_kept: 3,
        }
    );

    let summaries = &result.analysis.summaries;
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].exam.as_deref(), Some("Hand"));
    assert_eq!(summaries[0].n, 2);
    // The duplicate UID keeps the first room's record (kV 56, not 60).
    assert_eq!(summaries[0].median(Measure::Kv), Some(54.0));
    assert_eq!(summaries[0].median(Measure::ClinicalExi), Some(300.0));
    assert_eq!(summaries[0].median(Measure::Dose), None);
    assert_eq!(summaries[1].exam.as_deref(), Some("Thorax pa"));
    assert_eq!(summaries[1].n, 1);
    assert_eq!(summaries[1].median(Measure::Dap), Some(5.0));

    let written = fs::read_to_string(&result.output_file).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            ",Exam,n,kV,mAs,DAP,EXI,Collimation1,Collimation2,SID,Dose",
            "0,Hand,2,54.0,2.0,1.0,300.0,18.0,24.0,110.0,",
            "1,Thorax pa,1,125.0,1.8,5.0,260.0,35.0,43.0,180.0,2.5",
        ]
    );
}

#[test]
fn unquoted_comma_row_is_removed_before_it_shifts_values() {
    let input = TempDir::new().unwrap();
    fs::write(
        input.path().join("room.csv"),
        "OGP,kV,mAs,DAP,Clinical EXI,Collimation,SID,Dose,SOP Instance UID\n\
         Hand,52,1.6,1.0,310,18x24,110,2,1.1\n\
         Hand,52,1.6,1.0,310,18x24,110,4,5,1.2\n",
    )
    .unwrap();

    let analysis = analyse(input.path(), &PipelineOptions::default()).unwrap();

    assert_eq!(analysis.counts.comma_rows_removed, 1);
    assert_eq!(analysis.counts.rows_kept, 1);
    assert_eq!(analysis.summaries.len(), 1);
    assert_eq!(analysis.summaries[0].n, 1);
    assert_eq!(analysis.summaries[0].median(Measure::Dose), Some(2.0));
}

#[test]
fn missing_folder_is_recognised() {
    let dir = TempDir::new().unwrap();
    let error = analyse(&dir.path().join("missing"), &PipelineOptions::default()).unwrap_err();
    assert!(is_missing_input(&error));
}

#[test]
fn empty_folder_writes_header_only_report() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let config = RunConfig {
        input_dir: input.path().to_path_buf(),
        output_file: output.path().join("medians.csv"),
    };

    let result = run_pipeline(&config, &PipelineOptions::default()).unwrap();

    assert!(result.analysis.summaries.is_empty());
    let written = fs::read_to_string(&result.output_file).unwrap();
    assert_eq!(written.lines().count(), 1);
}

#[test]
fn non_numeric_dap_aborts_the_run() {
    let input = TempDir::new().unwrap();
    fs::write(
        input.path().join("bad.csv"),
        "OGP,kV,mAs,DAP,Clinical EXI,Collimation,SID,Dose,SOP Instance UID\n\
         Hand,52,1.6,high,310,18x24,110,,1.1\n",
    )
    .unwrap();

    let error = analyse(input.path(), &PipelineOptions::default()).unwrap_err();

    assert!(!is_missing_input(&error));
    assert!(format!("{error:#}").contains("non-numeric value \"high\" in column DAP"));
}
