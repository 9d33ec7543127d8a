mod common;
mod routing;
mod service;
mod validation;
