pub mod bulk_insert;
