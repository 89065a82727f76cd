//! Permission strings known to the compliance dashboard.
//!
//! Use these instead of string literals when gating UI.

pub mod foundation {
    pub mod organizations {
        pub const VIEW: &str = "Permissions.QualitasFoundation.Organizations.View";
        pub const CREATE: &str = "Permissions.QualitasFoundation.Organizations.Create";
        pub const UPDATE: &str = "Permissions.QualitasFoundation.Organizations.Update";
        pub const DELETE: &str = "Permissions.QualitasFoundation.Organizations.Delete";
    }

    pub mod organization_units {
        pub const VIEW: &str = "Permissions.QualitasFoundation.OrganizationUnits.View";
        pub const CREATE: &str = "Permissions.QualitasFoundation.OrganizationUnits.Create";
        pub const UPDATE: &str = "Permissions.QualitasFoundation.OrganizationUnits.Update";
        pub const DELETE: &str = "Permissions.QualitasFoundation.OrganizationUnits.Delete";
    }
}

pub mod compliance {
    pub mod regulatory_frameworks {
        pub const VIEW: &str = "Permissions.QualitasCompliance.MarcosNormativos.View";
        pub const CREATE: &str = "Permissions.QualitasCompliance.MarcosNormativos.Create";
        pub const UPDATE: &str = "Permissions.QualitasCompliance.MarcosNormativos.Update";
        pub const DELETE: &str = "Permissions.QualitasCompliance.MarcosNormativos.Delete";
    }

    pub mod clause_requirements {
        pub const VIEW: &str = "Permissions.QualitasCompliance.ClausulasRequisitos.View";
        pub const CREATE: &str = "Permissions.QualitasCompliance.ClausulasRequisitos.Create";
        pub const UPDATE: &str = "Permissions.QualitasCompliance.ClausulasRequisitos.Update";
        pub const DELETE: &str = "Permissions.QualitasCompliance.ClausulasRequisitos.Delete";
    }

    pub mod compliance_criteria {
        pub const VIEW: &str = "Permissions.QualitasCompliance.CriteriosCumplimiento.View";
        pub const CREATE: &str = "Permissions.QualitasCompliance.CriteriosCumplimiento.Create";
        pub const UPDATE: &str = "Permissions.QualitasCompliance.CriteriosCumplimiento.Update";
        pub const DELETE: &str = "Permissions.QualitasCompliance.CriteriosCumplimiento.Delete";
    }
}
