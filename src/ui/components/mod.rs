pub mod kpi_card;
pub mod number_field;
pub mod ship_picker;
pub mod toast;
pub mod verdict_panel;
