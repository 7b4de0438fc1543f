mod linked_list;

pub use linked_list::{CircularList, Handle};
