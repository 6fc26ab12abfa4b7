mod load;
mod model;

pub use load::{LoadError, load_export};
pub use model::{
    Address, Designation, Details, ExportDocument, FieldValue, Item, ItemState, LoginField,
    Overview, Section, SectionField,
};

#[cfg(test)]
pub use model::SsoLogin;
