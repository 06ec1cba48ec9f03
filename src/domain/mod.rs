// Domain layer - Fleet tire data model and pure derivations
pub mod dashboard;
pub mod reference;
pub mod summary;
pub mod tire;
pub mod widgets;
pub mod workbook;
