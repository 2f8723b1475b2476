pub mod dashboard_controller;
pub mod maintenance_controller;
pub mod session_controller;
pub mod shipment_controller;
pub mod vehicle_controller;
