use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which of the four screens is showing. Any view can follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActiveView {
    #[default]
    #[serde(rename = "dashboard")]
    Dashboard,
    #[serde(rename = "warga")]
    Residents,
    #[serde(rename = "iuran")]
    Dues,
    #[serde(rename = "kematian")]
    Deaths,
}

impl ActiveView {
    /// Navigation order.
    pub const ALL: [ActiveView; 4] = [
        ActiveView::Dashboard,
        ActiveView::Residents,
        ActiveView::Dues,
        ActiveView::Deaths,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveView::Dashboard => "dashboard",
            ActiveView::Residents => "warga",
            ActiveView::Dues => "iuran",
            ActiveView::Deaths => "kematian",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ActiveView::Dashboard => "Dashboard",
            ActiveView::Residents => "Residents",
            ActiveView::Dues => "Dues & Treasury",
            ActiveView::Deaths => "Deaths",
        }
    }
}

impl FromStr for ActiveView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActiveView::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown view `{s}`"))
    }
}
