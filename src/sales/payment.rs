//! Payment form: method selection, cash keypad and change.

use crate::constants::*;
use crate::notify::ValidationError;
use crate::utils::money::parse_amount;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Transfer, PaymentMethod::Card];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => PAYMENT_CASH,
            PaymentMethod::Transfer => PAYMENT_TRANSFER,
            PaymentMethod::Card => PAYMENT_CARD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOption {
    Nequi,
    Daviplata,
    Bancolombia,
    Otros,
}

impl TransferOption {
    pub const ALL: [TransferOption; 4] = [
        TransferOption::Nequi,
        TransferOption::Daviplata,
        TransferOption::Bancolombia,
        TransferOption::Otros,
    ];

    /// Name appended to "Transferencia/" in the stored payment method
    pub fn name(self) -> &'static str {
        match self {
            TransferOption::Nequi => "Nequi",
            TransferOption::Daviplata => "Daviplata",
            TransferOption::Bancolombia => "Bancolombia",
            TransferOption::Otros => "Otros",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransferOption::Otros => "Otros Bancos",
            other => other.name(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(char),
    Dot,
    Backspace,
    Clear,
}

/// Amount typed on the cash keypad
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashInput {
    raw: String,
}

impl CashInput {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Apply a key: one decimal point at most, two decimals at most
    pub fn press(&mut self, key: KeypadKey) {
        match key {
            KeypadKey::Clear => self.raw.clear(),
            KeypadKey::Backspace => {
                self.raw.pop();
            }
            KeypadKey::Dot => {
                if self.raw.contains('.') {
                    return;
                }
                if self.raw.is_empty() {
                    self.raw.push('0');
                }
                self.raw.push('.');
            }
            KeypadKey::Digit(d) if d.is_ascii_digit() => {
                if let Some((_, decimals)) = self.raw.split_once('.') {
                    if decimals.len() >= 2 {
                        return;
                    }
                }
                self.raw.push(d);
            }
            KeypadKey::Digit(_) => {}
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        parse_amount(&self.raw)
    }
}

/// What gets recorded on the order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    pub payment_method: String,
    pub amount_received: Option<Decimal>,
    pub change: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct PaymentForm {
    pub method: Option<PaymentMethod>,
    pub transfer_option: Option<TransferOption>,
    pub cash: CashInput,
    total: Decimal,
}

impl PaymentForm {
    /// Cash with Nequi preselected for transfers
    pub fn new(total: Decimal) -> Self {
        Self {
            method: Some(PaymentMethod::Cash),
            transfer_option: Some(TransferOption::Nequi),
            cash: CashInput::default(),
            total,
        }
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// received − total when enough was handed over, zero otherwise
    pub fn change(&self) -> Decimal {
        match self.cash.value() {
            Some(received) if received >= self.total => received - self.total,
            _ => Decimal::ZERO,
        }
    }

    pub fn validate(&self) -> Result<PaymentDetails, ValidationError> {
        let method = self
            .method
            .ok_or_else(|| ValidationError::new(ERROR_PAYMENT_METHOD, ERROR_PAYMENT_METHOD_DESC))?;

        match method {
            PaymentMethod::Cash => {
                if self.cash.is_empty() {
                    return Err(ValidationError::new(ERROR_AMOUNT_REQUIRED, ERROR_AMOUNT_REQUIRED_DESC));
                }
                let received = self.cash.value().unwrap_or(Decimal::ZERO);
                if received < self.total {
                    return Err(ValidationError::new(ERROR_AMOUNT_LOW, ERROR_AMOUNT_LOW_DESC));
                }
                Ok(PaymentDetails {
                    payment_method: PAYMENT_CASH.to_string(),
                    amount_received: Some(received),
                    change: Some(received - self.total),
                })
            }
            PaymentMethod::Transfer => {
                let option = self
                    .transfer_option
                    .ok_or_else(|| ValidationError::new(ERROR_TRANSFER_OPTION, ERROR_TRANSFER_OPTION_DESC))?;
                Ok(PaymentDetails {
                    payment_method: format!("{}/{}", PAYMENT_TRANSFER, option.name()),
                    amount_received: None,
                    change: None,
                })
            }
            PaymentMethod::Card => Ok(PaymentDetails {
                payment_method: PAYMENT_CARD.to_string(),
                amount_received: None,
                change: None,
            }),
        }
    }
}
