mod operation;
mod schema;
mod support;
