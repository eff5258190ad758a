//! Closed enumeration of the well-known context provider names.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A well-known context provider name.
///
/// Provider records store their name as a plain string; this enumeration
/// exists so callers can spell the recognized names type-safely and convert
/// between the two representations. Unknown names are rejected by
/// [`FromStr`], not by provider construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Plane-wave energy cutoffs.
    PlanewaveCutoffDataManager,
    /// Reciprocal-space k-point grid.
    KGridFormDataManager,
    /// Phonon q-point grid.
    QGridFormDataManager,
    /// Interpolated q-point grid.
    IGridFormDataManager,
    /// Phonon q-point path.
    QPathFormDataManager,
    /// Interpolated q-point path.
    IPathFormDataManager,
    /// Reciprocal-space k-point path.
    KPathFormDataManager,
    /// Explicitly listed k-point path.
    ExplicitKPathFormDataManager,
    /// Explicit k-point path in 2pi/a units.
    ExplicitKPath2PIBAFormDataManager,
    /// Hubbard J parameters.
    HubbardJContextManager,
    /// Hubbard U parameters.
    HubbardUContextManager,
    /// Hubbard V parameters.
    HubbardVContextManager,
    /// Legacy combined Hubbard parameters.
    HubbardContextManagerLegacy,
    /// Nudged elastic band settings.
    NEBFormDataManager,
    /// Boundary condition settings.
    BoundaryConditionsFormDataManager,
    /// Machine-learning settings.
    MLSettingsDataManager,
    /// Machine-learning train/test split.
    MLTrainTestSplitDataManager,
    /// Ion dynamics settings.
    IonDynamicsContextProvider,
    /// Collinear magnetization settings.
    CollinearMagnetizationDataManager,
    /// Non-collinear magnetization settings.
    NonCollinearMagnetizationDataManager,
    /// Quantum ESPRESSO pw.x input settings.
    QEPWXInputDataManager,
    /// Quantum ESPRESSO NEB input settings.
    QENEBInputDataManager,
    /// VASP input settings.
    VASPInputDataManager,
    /// VASP NEB input settings.
    VASPNEBInputDataManager,
    /// NWChem input settings.
    NWChemInputDataManager,
}

impl ProviderKind {
    /// Every known provider kind, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::PlanewaveCutoffDataManager,
        Self::KGridFormDataManager,
        Self::QGridFormDataManager,
        Self::IGridFormDataManager,
        Self::QPathFormDataManager,
        Self::IPathFormDataManager,
        Self::KPathFormDataManager,
        Self::ExplicitKPathFormDataManager,
        Self::ExplicitKPath2PIBAFormDataManager,
        Self::HubbardJContextManager,
        Self::HubbardUContextManager,
        Self::HubbardVContextManager,
        Self::HubbardContextManagerLegacy,
        Self::NEBFormDataManager,
        Self::BoundaryConditionsFormDataManager,
        Self::MLSettingsDataManager,
        Self::MLTrainTestSplitDataManager,
        Self::IonDynamicsContextProvider,
        Self::CollinearMagnetizationDataManager,
        Self::NonCollinearMagnetizationDataManager,
        Self::QEPWXInputDataManager,
        Self::QENEBInputDataManager,
        Self::VASPInputDataManager,
        Self::VASPNEBInputDataManager,
        Self::NWChemInputDataManager,
    ];

    /// The provider name as it appears in stored records and derived keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlanewaveCutoffDataManager => "PlanewaveCutoffDataManager",
            Self::KGridFormDataManager => "KGridFormDataManager",
            Self::QGridFormDataManager => "QGridFormDataManager",
            Self::IGridFormDataManager => "IGridFormDataManager",
            Self::QPathFormDataManager => "QPathFormDataManager",
            Self::IPathFormDataManager => "IPathFormDataManager",
            Self::KPathFormDataManager => "KPathFormDataManager",
            Self::ExplicitKPathFormDataManager => "ExplicitKPathFormDataManager",
            Self::ExplicitKPath2PIBAFormDataManager => "ExplicitKPath2PIBAFormDataManager",
            Self::HubbardJContextManager => "HubbardJContextManager",
            Self::HubbardUContextManager => "HubbardUContextManager",
            Self::HubbardVContextManager => "HubbardVContextManager",
            Self::HubbardContextManagerLegacy => "HubbardContextManagerLegacy",
            Self::NEBFormDataManager => "NEBFormDataManager",
            Self::BoundaryConditionsFormDataManager => "BoundaryConditionsFormDataManager",
            Self::MLSettingsDataManager => "MLSettingsDataManager",
            Self::MLTrainTestSplitDataManager => "MLTrainTestSplitDataManager",
            Self::IonDynamicsContextProvider => "IonDynamicsContextProvider",
            Self::CollinearMagnetizationDataManager => "CollinearMagnetizationDataManager",
            Self::NonCollinearMagnetizationDataManager => "NonCollinearMagnetizationDataManager",
            Self::QEPWXInputDataManager => "QEPWXInputDataManager",
            Self::QENEBInputDataManager => "QENEBInputDataManager",
            Self::VASPInputDataManager => "VASPInputDataManager",
            Self::VASPNEBInputDataManager => "VASPNEBInputDataManager",
            Self::NWChemInputDataManager => "NWChemInputDataManager",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::new("name", format!("unknown provider kind '{s}'")))
    }
}

impl From<ProviderKind> for String {
    fn from(kind: ProviderKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_exact() {
        assert_eq!(
            ProviderKind::KPathFormDataManager.as_str(),
            "KPathFormDataManager"
        );
        assert_eq!(
            ProviderKind::ExplicitKPath2PIBAFormDataManager.as_str(),
            "ExplicitKPath2PIBAFormDataManager"
        );
        assert_eq!(
            ProviderKind::NWChemInputDataManager.as_str(),
            "NWChemInputDataManager"
        );
    }

    #[test]
    fn test_from_str_round_trips_all() {
        for kind in ProviderKind::ALL {
            let parsed: ProviderKind = kind.as_str().parse().expect("known kind parses");
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "NotAManager".parse::<ProviderKind>().unwrap_err();
        assert_eq!(err.field, "name");
        assert!(err.message.contains("NotAManager"));
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(
            ProviderKind::QEPWXInputDataManager.to_string(),
            "QEPWXInputDataManager"
        );
    }

    #[test]
    fn test_serialize_as_name_string() {
        let json = serde_json::to_string(&ProviderKind::KGridFormDataManager).unwrap();
        assert_eq!(json, r#""KGridFormDataManager""#);

        let parsed: ProviderKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ProviderKind::KGridFormDataManager);
    }

    #[test]
    fn test_all_is_complete_and_distinct() {
        assert_eq!(ProviderKind::ALL.len(), 25);
        let mut names: Vec<&str> = ProviderKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 25);
    }
}
