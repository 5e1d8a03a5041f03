//! Control pulse container for PULSIM
//!
//! Gantree: L2_Pulse → Pulse
//!
//! A pulse carries one ideal control term plus the coherent and Lindblad
//! noise terms accumulated by the noise pipeline. A pulse without an ideal
//! term is the systematic-noise accumulator.

use crate::term::{Coefficient, PulseTerm, SplineKind};
use pulsim_core::labels::SYSTEMATIC_NOISE;
use pulsim_core::{Operator, PulsimResult, QubitId, TimeList};
use std::fmt;

/// Control pulse with accumulated noise
/// Gantree: Pulse // 제어 펄스
#[derive(Debug, Clone, PartialEq)]
pub struct Pulse {
    /// Pulse label
    /// Gantree: label: String // 라벨
    label: String,

    /// Ideal control term, absent for the accumulator
    /// Gantree: ideal: Option<PulseTerm> // 이상 제어항
    ideal: Option<PulseTerm>,

    /// Interpolation hint passed on to the solver
    spline_kind: Option<SplineKind>,

    /// Noise added to the generator
    /// Gantree: coherent_noise: Vec<PulseTerm> // 결맞음 노이즈
    coherent_noise: Vec<PulseTerm>,

    /// Collapse operators for the dissipator
    /// Gantree: lindblad_noise: Vec<PulseTerm> // 린드블라드 노이즈
    lindblad_noise: Vec<PulseTerm>,
}

impl Pulse {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a pulse with an ideal control term
    /// Gantree: new(label,op,targets,tlist,coeff) -> Result<Self> // 생성+검증
    pub fn new(
        label: &str,
        operator: Operator,
        targets: Vec<QubitId>,
        tlist: Option<TimeList>,
        coeff: Coefficient,
    ) -> PulsimResult<Self> {
        let ideal = PulseTerm::new(operator, targets, tlist, coeff)?;
        Ok(Self {
            label: label.to_string(),
            ideal: Some(ideal),
            spline_kind: None,
            coherent_noise: Vec::new(),
            lindblad_noise: Vec::new(),
        })
    }

    /// Create an empty systematic-noise accumulator
    /// Gantree: systematic(spline) -> Self // 시스템 노이즈 누산기
    pub fn systematic(spline_kind: Option<SplineKind>) -> Self {
        Self {
            label: SYSTEMATIC_NOISE.to_string(),
            ideal: None,
            spline_kind,
            coherent_noise: Vec::new(),
            lindblad_noise: Vec::new(),
        }
    }

    /// Set the interpolation hint
    pub fn with_spline_kind(mut self, kind: SplineKind) -> Self {
        self.spline_kind = Some(kind);
        self
    }

    // ========================================================================
    // Noise Terms
    // ========================================================================

    /// Append a coherent noise term
    /// Gantree: add_coherent_noise(&mut,op,targets,tlist,coeff) -> Result // 결맞음 추가
    pub fn add_coherent_noise(
        &mut self,
        operator: Operator,
        targets: Vec<QubitId>,
        tlist: Option<TimeList>,
        coeff: Coefficient,
    ) -> PulsimResult<()> {
        let term = PulseTerm::new(operator, targets, tlist, coeff)?;
        self.coherent_noise.push(term);
        Ok(())
    }

    /// Append a Lindblad noise term
    /// Gantree: add_lindblad_noise(&mut,op,targets,tlist,coeff) -> Result // 소산 추가
    pub fn add_lindblad_noise(
        &mut self,
        operator: Operator,
        targets: Vec<QubitId>,
        tlist: Option<TimeList>,
        coeff: Coefficient,
    ) -> PulsimResult<()> {
        let term = PulseTerm::new(operator, targets, tlist, coeff)?;
        self.lindblad_noise.push(term);
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Pulse label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Ideal control term
    pub fn ideal(&self) -> Option<&PulseTerm> {
        self.ideal.as_ref()
    }

    /// Ideal generator
    pub fn operator(&self) -> Option<&Operator> {
        self.ideal.as_ref().map(PulseTerm::operator)
    }

    /// Targets of the ideal term (empty for the accumulator)
    pub fn targets(&self) -> &[QubitId] {
        self.ideal.as_ref().map(PulseTerm::targets).unwrap_or(&[])
    }

    /// Time grid of the ideal term
    pub fn tlist(&self) -> Option<&[f64]> {
        self.ideal.as_ref().and_then(PulseTerm::tlist)
    }

    /// Coefficient of the ideal term
    pub fn coeff(&self) -> Option<&Coefficient> {
        self.ideal.as_ref().map(PulseTerm::coeff)
    }

    /// Interpolation hint
    pub fn spline_kind(&self) -> Option<SplineKind> {
        self.spline_kind
    }

    /// Coherent noise terms
    pub fn coherent_noise(&self) -> &[PulseTerm] {
        &self.coherent_noise
    }

    /// Lindblad noise terms
    pub fn lindblad_noise(&self) -> &[PulseTerm] {
        &self.lindblad_noise
    }

    /// Check for the systematic-noise accumulator (no ideal term)
    pub fn is_systematic(&self) -> bool {
        self.ideal.is_none()
    }

    /// Check whether any noise term was added
    pub fn has_noise(&self) -> bool {
        !self.coherent_noise.is_empty() || !self.lindblad_noise.is_empty()
    }

    // ========================================================================
    // Time Analysis
    // ========================================================================

    /// Earliest and latest point of the ideal time grid
    /// Gantree: time_span(&self) -> Option<(f64,f64)> // 시간 범위
    pub fn time_span(&self) -> Option<(f64, f64)> {
        self.ideal.as_ref().and_then(PulseTerm::time_span)
    }

    /// Sorted union of the time grids of every term
    /// Gantree: full_tlist(&self) -> Option<TimeList> // 전체 시간축
    pub fn full_tlist(&self) -> Option<TimeList> {
        let mut all: TimeList = self
            .ideal
            .iter()
            .chain(self.coherent_noise.iter())
            .chain(self.lindblad_noise.iter())
            .filter_map(PulseTerm::tlist)
            .flatten()
            .copied()
            .collect();
        if all.is_empty() {
            return None;
        }
        all.sort_by(|a, b| a.total_cmp(b));
        all.dedup();
        Some(all)
    }
}

impl fmt::Display for Pulse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ideal {
            Some(ideal) => write!(f, "Pulse '{}': {}", self.label, ideal)?,
            None => write!(f, "Pulse '{}': no ideal control", self.label)?,
        }
        write!(
            f,
            ", {} coherent, {} lindblad",
            self.coherent_noise.len(),
            self.lindblad_noise.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
