pub(crate) mod heart;
