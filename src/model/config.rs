use serde::{Deserialize, Serialize};

use crate::model::todo::ViewMode;
use crate::util::casefold::FoldRule;

/// Configuration from tick.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// How a new todo's id is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// A counter that only moves forward; removed ids are never handed out again.
    #[default]
    Counter,
    /// Current item count plus one. Removing anything but the last item and
    /// then creating a new one repeats an id that is still in the list.
    Length,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub policy: IdPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub fold: FoldRule,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Mode the store starts in
    #[serde(default)]
    pub start_mode: ViewMode,
}
