use serde::{Deserialize, Serialize};

/// How a single match outcome relates to the performance behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum LuckLabel {
    /// Played well and lost
    GoodPerformanceLoss,
    /// Played well above the team and still lost
    CarryingLoss,
    /// Played badly and won
    BadPerformanceWin,
    /// Played well below the team and won
    CarriedByTeam,
    /// Played well above the team and won. Deserved, so it carries no luck.
    CarriedWin,
    /// Average game won alongside a weak team
    WinWithWeakTeam,
    /// Average game lost alongside a strong team
    LoseWithStrongTeam,
}
