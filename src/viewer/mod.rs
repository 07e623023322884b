pub mod model;
pub mod profile;
pub mod session;

pub use model::UnfollowerListModel;
pub use profile::{profile_url, ProfileLauncher, SystemBrowser};
pub use session::ViewerSession;
