//! API Resources
//!
//! Resource service objects. Each borrows the client and issues its calls
//! through `Client::new_request` and `Client::execute`.

pub mod devices;
pub mod facilities;
pub mod operating_systems;
pub mod options;
pub mod plans;
pub mod projects;

pub use devices::{Device, DeviceCreateRequest, DeviceList, DeviceService};
pub use facilities::{Facility, FacilityList, FacilityService};
pub use operating_systems::{OperatingSystem, OperatingSystemList, OperatingSystemService};
pub use options::ListOptions;
pub use plans::{Plan, PlanList, PlanService};
pub use projects::{Project, ProjectCreateRequest, ProjectList, ProjectService};
