// Core types for the module view-state machine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// On-chain lifecycle stage of a module as last observed by the store.
///
/// This is the ground truth the view machine stays synchronized with; it only
/// changes when the store observes an on-chain transaction. Wire names are the
/// camelCase strings reported by the web3 client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserModuleStatus {
    #[serde(rename = "nonExistent")]
    NonExistent,
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "closedByOwner")]
    ClosedByOwner,
    #[serde(rename = "closedByLiquidation")]
    ClosedByLiquidation,
    #[serde(rename = "closedByRedemption")]
    ClosedByRedemption,
}

/// Raised when a raw status string from a collaborator is not a known
/// `UserModuleStatus`. This is a contract violation, not a business condition.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown module status: {0:?}")]
pub struct StatusParseError(pub String);

impl UserModuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserModuleStatus::NonExistent => "nonExistent",
            UserModuleStatus::Open => "open",
            UserModuleStatus::ClosedByOwner => "closedByOwner",
            UserModuleStatus::ClosedByLiquidation => "closedByLiquidation",
            UserModuleStatus::ClosedByRedemption => "closedByRedemption",
        }
    }
}

impl FromStr for UserModuleStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nonExistent" => Ok(UserModuleStatus::NonExistent),
            "open" => Ok(UserModuleStatus::Open),
            "closedByOwner" => Ok(UserModuleStatus::ClosedByOwner),
            "closedByLiquidation" => Ok(UserModuleStatus::ClosedByLiquidation),
            "closedByRedemption" => Ok(UserModuleStatus::ClosedByRedemption),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

impl fmt::Display for UserModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI-facing view state derived from on-chain status plus pending user intent.
///
/// `None` and the status-derived states (`Active`, `Liquidated`, `Redeemed`)
/// can be initial; `Opening`, `Adjusting` and `Closing` are only reachable
/// through user-intent events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleView {
    None,
    Opening,
    Active,
    Adjusting,
    Closing,
    Liquidated,
    Redeemed,
}

impl ModuleView {
    /// All view states, for exhaustive table checks.
    pub const ALL: [ModuleView; 7] = [
        ModuleView::None,
        ModuleView::Opening,
        ModuleView::Active,
        ModuleView::Adjusting,
        ModuleView::Closing,
        ModuleView::Liquidated,
        ModuleView::Redeemed,
    ];

    /// Initial view for a freshly created machine, derived from the
    /// last-observed on-chain status.
    pub fn from_status(status: UserModuleStatus) -> Self {
        match status {
            UserModuleStatus::ClosedByLiquidation => ModuleView::Liquidated,
            UserModuleStatus::ClosedByRedemption => ModuleView::Redeemed,
            UserModuleStatus::Open => ModuleView::Active,
            UserModuleStatus::NonExistent | UserModuleStatus::ClosedByOwner => ModuleView::None,
        }
    }

    /// Whether this view represents a pending transaction whose outcome the
    /// store has not yet confirmed.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            ModuleView::Opening | ModuleView::Adjusting | ModuleView::Closing
        )
    }

    /// Whether the module was force-closed by a third party.
    pub fn is_closed_involuntarily(&self) -> bool {
        matches!(self, ModuleView::Liquidated | ModuleView::Redeemed)
    }
}

/// Inputs to the view machine: user gestures from the UI and status
/// confirmations from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleEvent {
    OpenModulePressed,
    AdjustModulePressed,
    CloseModulePressed,
    CancelAdjustModulePressed,
    ModuleOpened,
    ModuleAdjusted,
    ModuleClosed,
    ModuleLiquidated,
    ModuleRedeemed,
    ModuleSurplusCollateralClaimed,
}

impl ModuleEvent {
    /// All events, for exhaustive table checks.
    pub const ALL: [ModuleEvent; 10] = [
        ModuleEvent::OpenModulePressed,
        ModuleEvent::AdjustModulePressed,
        ModuleEvent::CloseModulePressed,
        ModuleEvent::CancelAdjustModulePressed,
        ModuleEvent::ModuleOpened,
        ModuleEvent::ModuleAdjusted,
        ModuleEvent::ModuleClosed,
        ModuleEvent::ModuleLiquidated,
        ModuleEvent::ModuleRedeemed,
        ModuleEvent::ModuleSurplusCollateralClaimed,
    ];

    /// Events originating from UI gestures.
    pub fn is_user_intent(&self) -> bool {
        matches!(
            self,
            ModuleEvent::OpenModulePressed
                | ModuleEvent::AdjustModulePressed
                | ModuleEvent::CloseModulePressed
                | ModuleEvent::CancelAdjustModulePressed
        )
    }

    /// Events originating from the store reflecting observed chain state.
    pub fn is_status_confirmation(&self) -> bool {
        !self.is_user_intent()
    }

    /// Confirmation event synthesized when the store reports a new status.
    ///
    /// `nonExistent` is not a valid post-transition status and maps to no
    /// event; the bridge ignores it.
    pub fn from_status(status: UserModuleStatus) -> Option<Self> {
        match status {
            UserModuleStatus::Open => Some(ModuleEvent::ModuleOpened),
            UserModuleStatus::ClosedByOwner => Some(ModuleEvent::ModuleClosed),
            UserModuleStatus::ClosedByLiquidation => Some(ModuleEvent::ModuleLiquidated),
            UserModuleStatus::ClosedByRedemption => Some(ModuleEvent::ModuleRedeemed),
            UserModuleStatus::NonExistent => None,
        }
    }
}
