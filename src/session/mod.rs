pub(crate) mod recorder;
