pub(crate) mod glow;
pub(crate) mod sparkle;
