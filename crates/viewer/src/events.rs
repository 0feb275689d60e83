use camera::CameraPose;
use scene::entity::RegionId;

/// Interaction outcomes recorded on the viewer's event bus, in the order
/// they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    HoverChanged {
        from: Option<RegionId>,
        to: Option<RegionId>,
    },
    Selected {
        region: RegionId,
        previous: Option<RegionId>,
    },
    Deselected {
        region: RegionId,
    },
    FlightStarted {
        goal: CameraPose,
    },
    FlightFinished,
}
