pub(super) mod alerts;
pub(super) mod config_edit;
pub(super) mod help;
pub(super) mod status;
