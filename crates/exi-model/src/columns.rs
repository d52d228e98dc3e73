//! Canonical column names.
//!
//! Device exports name their columns differently between models and firmware
//! revisions. The normalizer maps them onto the names below; everything
//! downstream addresses columns only through these constants.

/// Tube voltage.
pub const KV: &str = "kV";
/// Tube current-time product.
pub const MAS: &str = "mAs";
/// Dose-area product.
pub const DAP: &str = "DAP";
/// Device-reported exposure index.
pub const CLINICAL_EXI: &str = "Clinical EXI";
/// Raw field size, recorded as `<width>x<height>`.
pub const COLLIMATION: &str = "Collimation";
/// First collimation dimension (derived).
pub const COLLIMATION_1: &str = "Collimation 1";
/// Second collimation dimension (derived).
pub const COLLIMATION_2: &str = "Collimation 2";
/// Source-to-image distance.
pub const SID: &str = "SID";
/// Detector dose; absent for many exam types.
pub const DOSE: &str = "Dose";
/// Exam/protocol label used for grouping. Never renamed.
pub const OGP: &str = "OGP";
/// Unique identifier of one exposure record. Never renamed.
pub const SOP_INSTANCE_UID: &str = "SOP Instance UID";

/// Header row of the summary report, without the leading index column.
pub const REPORT_HEADER: [&str; 10] = [
    "Exam",
    "n",
    "kV",
    "mAs",
    "DAP",
    "EXI",
    "Collimation1",
    "Collimation2",
    "SID",
    "Dose",
];

/// A numeric field summarized per exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Kv,
    Mas,
    Dap,
    ClinicalExi,
    Collimation1,
    Collimation2,
    Sid,
    Dose,
}

impl Measure {
    /// All measures in report column order.
    pub const ALL: [Measure; 8] = [
        Measure::Kv,
        Measure::Mas,
        Measure::Dap,
        Measure::ClinicalExi,
        Measure::Collimation1,
        Measure::Collimation2,
        Measure::Sid,
        Measure::Dose,
    ];

    /// Column holding this measure in the cleaned table.
    pub fn column(self) -> &'static str {
        match self {
            Measure::Kv => KV,
            Measure::Mas => MAS,
            Measure::Dap => DAP,
            Measure::ClinicalExi => CLINICAL_EXI,
            Measure::Collimation1 => COLLIMATION_1,
            Measure::Collimation2 => COLLIMATION_2,
            Measure::Sid => SID,
            Measure::Dose => DOSE,
        }
    }

    /// Header used for this measure in the summary report.
    pub fn report_label(self) -> &'static str {
        match self {
            Measure::Kv => "kV",
            Measure::Mas => "mAs",
            Measure::Dap => "DAP",
            Measure::ClinicalExi => "EXI",
            Measure::Collimation1 => "Collimation1",
            Measure::Collimation2 => "Collimation2",
            Measure::Sid => "SID",
            Measure::Dose => "Dose",
        }
    }

    /// Whether a non-numeric value in this column aborts the run.
    ///
    /// Only `Dose` is coerced leniently.
    pub fn is_strict(self) -> bool {
        !matches!(self, Measure::Dose)
    }
}
