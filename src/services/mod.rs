pub mod playback;
pub mod providers;
pub mod search;
