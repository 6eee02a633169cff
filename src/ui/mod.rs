/// UI layer: egui rendering of the controls, metric cards, and trend chart.

pub mod metrics;
pub mod panels;
pub mod plot;
