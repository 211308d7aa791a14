//! Status labels for pods and nodes

use crate::inventory::{Condition, ContainerState};

/// Phase of a pod that has not been scheduled or started yet
pub const PENDING: &str = "Pending";

/// Label used when a container is running
pub const RUNNING: &str = "Running";

/// Best-effort status label for a pod, in the spirit of `kubectl get pods`.
///
/// A `Pending` phase is returned as-is. Otherwise containers are scanned in
/// order: the first waiting container's reason wins outright, a terminated
/// container's reason wins over any running container seen before it, and
/// a running container only replaces the phase if nothing else matched.
#[must_use]
pub fn classify(phase: &str, containers: &[ContainerState]) -> String {
    if phase == PENDING {
        return phase.to_string();
    }

    let mut label = phase;
    for state in containers {
        match state {
            ContainerState::Waiting { reason } | ContainerState::Terminated { reason } => {
                return reason.clone();
            }
            ContainerState::Running => label = RUNNING,
            ContainerState::Unknown => {}
        }
    }
    label.to_string()
}

/// Node status from its `Ready` condition: `Ready`, `NotReady`, `Unknown`,
/// or `<unknown>` when the condition is absent.
#[must_use]
pub fn node_status(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .rev()
        .filter(|c| c.kind == "Ready")
        .find_map(|c| match c.status.as_str() {
            "True" => Some("Ready"),
            "False" => Some("NotReady"),
            "Unknown" => Some("Unknown"),
            _ => None,
        })
        .unwrap_or("<unknown>")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waiting(reason: &str) -> ContainerState {
        ContainerState::Waiting {
            reason: reason.to_string(),
        }
    }

    fn terminated(reason: &str) -> ContainerState {
        ContainerState::Terminated {
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_pending_is_returned_unchanged() {
        assert_eq!(classify("Pending", &[]), "Pending");
        assert_eq!(
            classify("Pending", &[waiting("ContainerCreating")]),
            "Pending"
        );
    }

    #[test]
    fn test_waiting_reason_beats_phase() {
        assert_eq!(
            classify("Running", &[waiting("CrashLoopBackOff")]),
            "CrashLoopBackOff"
        );
    }

    #[test]
    fn test_terminated_after_running_wins() {
        let states = [ContainerState::Running, terminated("Error")];
        assert_eq!(classify("Running", &states), "Error");
    }

    #[test]
    fn test_first_match_stops_the_scan() {
        let states = [terminated("Completed"), waiting("ImagePullBackOff")];
        assert_eq!(classify("Running", &states), "Completed");

        let states = [waiting("ErrImagePull"), terminated("OOMKilled")];
        assert_eq!(classify("Running", &states), "ErrImagePull");
    }

    #[test]
    fn test_running_replaces_phase() {
        let states = [ContainerState::Running, ContainerState::Running];
        assert_eq!(classify("Unknown", &states), "Running");
    }

    #[test]
    fn test_no_containers_falls_back_to_phase() {
        assert_eq!(classify("Succeeded", &[]), "Succeeded");
        assert_eq!(classify("Failed", &[ContainerState::Unknown]), "Failed");
    }

    #[test]
    fn test_node_status_from_ready_condition() {
        let ready = [
            Condition::new("MemoryPressure", "False"),
            Condition::new("Ready", "True"),
        ];
        assert_eq!(node_status(&ready), "Ready");
        assert_eq!(node_status(&[Condition::new("Ready", "False")]), "NotReady");
        assert_eq!(node_status(&[Condition::new("Ready", "Unknown")]), "Unknown");
    }

    #[test]
    fn test_node_status_without_ready_condition() {
        assert_eq!(node_status(&[]), "<unknown>");
        assert_eq!(
            node_status(&[Condition::new("DiskPressure", "False")]),
            "<unknown>"
        );
    }
}
