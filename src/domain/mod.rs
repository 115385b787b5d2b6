pub mod page;

pub use self::page::Page;
