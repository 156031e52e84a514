mod observability;
mod persistence;
