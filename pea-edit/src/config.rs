//! Analysis configuration.
//!
//! Configuration is plain data: built by the caller (usually from CLI flags),
//! checked once with `validate()`, then shared read-only by every stage.

use std::fmt;
use std::str::FromStr;

use pea_core::{PeaError, Result};
use pea_seq::normalize_nucleotides;

use crate::base_edit::Substitution;

pub const DEFAULT_COMPARISON_RADIUS: usize = 60;
pub const MIN_COMPARISON_RADIUS: usize = 20;
pub const DEFAULT_INDICATOR_LENGTH: usize = 15;
pub const DEFAULT_USER_REGION_LENGTH: usize = 30;
pub const DEFAULT_USER_REGION_OFFSET: usize = 3;
pub const DEFAULT_PAM_LENGTH: usize = 3;

/// A sequence argument with a display name.
///
/// Parsed from `NAME:SEQ`; an argument without exactly one `:` is both the
/// name and the sequence. The sequence is uppercased and must be DNA.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedSeq {
    name: String,
    sequence: String,
}

impl NamedSeq {
    pub fn new(name: impl Into<String>, sequence: impl AsRef<[u8]>) -> Result<Self> {
        let bytes = normalize_nucleotides(sequence)?;
        let sequence = String::from_utf8(bytes)
            .map_err(|e| PeaError::InvalidInput(format!("sequence is not ASCII: {e}")))?;
        if sequence.is_empty() {
            return Err(PeaError::InvalidInput("empty sequence".into()));
        }
        Ok(Self {
            name: name.into(),
            sequence,
        })
    }

    pub fn parse(arg: &str) -> Result<Self> {
        let parts: Vec<&str> = arg.split(':').collect();
        match parts.as_slice() {
            [name, seq] => Self::new(*name, seq),
            _ => Self::new(arg, arg),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }
}

impl FromStr for NamedSeq {
    type Err = PeaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NamedSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Settings shared by `align-mutations` and `prime-editor`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisConfig {
    pub amplicon: NamedSeq,
    pub target: NamedSeq,
    /// Expected user-region content after a successful prime edit.
    pub intended_mutation: Option<NamedSeq>,
    /// Half-width of the comparison window around the PAM start.
    pub comparison_radius: usize,
    pub indicator_length: usize,
    pub user_region_length: usize,
    /// Distance the user region starts upstream of the PAM.
    pub user_region_offset: usize,
    /// Trailing bases of the target that form the PAM.
    pub pam_length: usize,
    /// Score gaps normally; otherwise gap opening is prohibitively expensive.
    pub indel_in_alignment: bool,
}

impl AnalysisConfig {
    /// Configuration with default window geometry.
    pub fn new(amplicon: NamedSeq, target: NamedSeq) -> Self {
        Self {
            amplicon,
            target,
            intended_mutation: None,
            comparison_radius: DEFAULT_COMPARISON_RADIUS,
            indicator_length: DEFAULT_INDICATOR_LENGTH,
            user_region_length: DEFAULT_USER_REGION_LENGTH,
            user_region_offset: DEFAULT_USER_REGION_OFFSET,
            pam_length: DEFAULT_PAM_LENGTH,
            indel_in_alignment: true,
        }
    }

    pub fn with_intended_mutation(mut self, mutation: NamedSeq) -> Self {
        self.intended_mutation = Some(mutation);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.comparison_radius <= MIN_COMPARISON_RADIUS {
            return Err(PeaError::InvalidInput(format!(
                "comparison radius must be larger than {MIN_COMPARISON_RADIUS}, got {}",
                self.comparison_radius
            )));
        }
        if self.indicator_length == 0 {
            return Err(PeaError::InvalidInput("indicator length must be at least 1".into()));
        }
        let window = self.comparison_radius.saturating_mul(2);
        if self.indicator_length > window {
            return Err(PeaError::InvalidInput(format!(
                "indicator length {} exceeds the comparison window ({window} bases)",
                self.indicator_length
            )));
        }
        if self.user_region_length == 0 {
            return Err(PeaError::InvalidInput("user region length must be at least 1".into()));
        }
        if self.pam_length > self.target.sequence().len() {
            return Err(PeaError::InvalidInput(format!(
                "PAM length {} exceeds the target length {}",
                self.pam_length,
                self.target.sequence().len()
            )));
        }
        Ok(())
    }
}

/// Settings for `be-stats`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEditingConfig {
    pub substitutions: Vec<Substitution>,
    /// Reference bases X for the X-to-non-X statistics.
    pub non_x_bases: Vec<u8>,
    /// Drop rows with indels; otherwise only insertion columns are masked.
    pub exclude_indel_reads: bool,
}

impl Default for BaseEditingConfig {
    fn default() -> Self {
        Self {
            substitutions: Vec::new(),
            non_x_bases: Vec::new(),
            exclude_indel_reads: true,
        }
    }
}

impl BaseEditingConfig {
    /// Build from textual arguments such as `CtoT` and `C`.
    pub fn from_args<S: AsRef<str>>(substitutions: &[S], non_x_bases: &[S], exclude_indel_reads: bool) -> Result<Self> {
        let substitutions = substitutions
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<Substitution>>>()?;
        let non_x_bases = non_x_bases
            .iter()
            .map(|s| parse_base(s.as_ref()))
            .collect::<Result<Vec<u8>>>()?;
        Ok(Self {
            substitutions,
            non_x_bases,
            exclude_indel_reads,
        })
    }
}

/// Parse a single nucleotide argument.
pub fn parse_base(s: &str) -> Result<u8> {
    match s.as_bytes() {
        [b] if b"ACGT".contains(b) => Ok(*b),
        _ => Err(PeaError::InvalidInput(format!(
            "invalid base {s:?}: expected one of A, C, G, T"
        ))),
    }
}
