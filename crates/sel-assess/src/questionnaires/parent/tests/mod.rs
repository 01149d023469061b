mod common;
mod form;
mod scoring;
