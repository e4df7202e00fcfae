pub(crate) mod backend;
pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod cpu;
pub(crate) mod recording;
pub(crate) mod style;
pub(crate) mod surface;
