pub mod trip_form;
pub mod trip_store;
