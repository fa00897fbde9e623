mod arbitration;
mod groups;
mod lifecycle;
mod support;
mod triggers;
