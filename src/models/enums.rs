//! Enumerations shared with the backend.
//!
//! Every enum travels as its SCREAMING_SNAKE_CASE name. Spanish labels used by
//! the screens live next to the variants.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    User,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Manager => "Gerente",
            Role::User => "Usuario",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeStore {
    Principal,
    #[default]
    Normal,
    Distribution,
}

/// Personal document types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TypeId {
    #[default]
    CC,
    NIT,
    TI,
    CE,
    PP,
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeId::CC => "CC",
            TypeId::NIT => "NIT",
            TypeId::TI => "TI",
            TypeId::CE => "CE",
            TypeId::PP => "PP",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeContract {
    Indefinite,
    FixedTerm,
    Internship,
    Temporary,
    PartTime,
}

impl TypeContract {
    pub fn label(self) -> &'static str {
        match self {
            TypeContract::Indefinite => "Termino Indefinido",
            TypeContract::FixedTerm => "Termino Fijo",
            TypeContract::Internship => "Prácticas",
            TypeContract::Temporary => "Temporal",
            TypeContract::PartTime => "Medio Tiempo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    KG,
    L,
    UN,
    GRAM,
    ML,
    LB,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusOrder {
    #[default]
    Pending,
    Completed,
    Canceled,
}

impl StatusOrder {
    pub fn label(self) -> &'static str {
        match self {
            StatusOrder::Pending => "En Progreso",
            StatusOrder::Completed => "Completado",
            StatusOrder::Canceled => "Cancelado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    #[default]
    SupplyRequest,
    ReturnRequest,
    RelocationRequest,
}

impl RequestType {
    pub fn label(self) -> &'static str {
        match self {
            RequestType::SupplyRequest => "Solicitud de Suministro",
            RequestType::ReturnRequest => "Devolución",
            RequestType::RelocationRequest => "Reubicación",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    InProgress,
    Completed,
    Canceled,
}

impl RequestStatus {
    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pendiente",
            RequestStatus::Approved => "Aprobada",
            RequestStatus::Rejected => "Rechazada",
            RequestStatus::InProgress => "En Proceso",
            RequestStatus::Completed => "Completada",
            RequestStatus::Canceled => "Cancelada",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnReason {
    Damaged,
    Expired,
    Incorrect,
    ExcessStock,
    Other,
}

impl ReturnReason {
    pub const ALL: [ReturnReason; 5] = [
        ReturnReason::Damaged,
        ReturnReason::Expired,
        ReturnReason::Incorrect,
        ReturnReason::ExcessStock,
        ReturnReason::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReturnReason::Damaged => "Dañado",
            ReturnReason::Expired => "Vencido",
            ReturnReason::Incorrect => "Incorrecto",
            ReturnReason::ExcessStock => "Exceso de stock",
            ReturnReason::Other => "Otro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Rent,
    Utilities,
    Services,
    Maintenance,
    Supplies,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Rent,
        ExpenseCategory::Utilities,
        ExpenseCategory::Services,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Supplies,
        ExpenseCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "Arriendo",
            ExpenseCategory::Utilities => "Servicios Públicos",
            ExpenseCategory::Services => "Servicios",
            ExpenseCategory::Maintenance => "Mantenimiento",
            ExpenseCategory::Supplies => "Suministros",
            ExpenseCategory::Other => "Otro",
        }
    }

    /// Cycle to the next category, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}
