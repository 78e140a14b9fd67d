mod collection;
mod item;

pub use collection::CollectionProxy;
pub use item::ItemProxy;
