pub(crate) mod clock;
pub(crate) mod controller;
pub(crate) mod restart;
pub(crate) mod scheduler;
