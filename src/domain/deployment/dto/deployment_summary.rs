use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst};

/// One entry of the namespace listing as returned by the orchestration API.
///
/// The API carries `replicas` as text (`"3"`); plain numbers are accepted as
/// well. Anything unparsable, including the literal `"null"` the API emits for
/// an unset replica count, reads as 0. Counts are int32 as in the apps/v1
/// schema, so out-of-range values read as 0 too.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSummary {
    pub name: String,

    #[serde_as(as = "DefaultOnError<PickFirst<(DisplayFromStr, _)>>")]
    #[serde(default)]
    pub replicas: i32,
}

impl DeploymentSummary {
    pub fn new(name: impl Into<String>, replicas: i32) -> Self {
        Self {
            name: name.into(),
            replicas,
        }
    }
}
