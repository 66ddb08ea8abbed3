pub(crate) mod health_check_controller;
pub(crate) mod share_controller;
pub(crate) mod summary_controller;
