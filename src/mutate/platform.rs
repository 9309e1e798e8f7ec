//! Static platform-integration context fed to the oracle.
//!
//! This text describes the host platform's conventions. It is fixed
//! configuration (never derived from the scanned model) and is injected
//! at engine construction so concurrent pipelines share nothing mutable.

/// Host platform conventions included in every planning request.
pub const PLATFORM_CONTEXT: &str = r"You are integrating an existing web application into the host platform.
Platform conventions, all of which the edited app must follow:

SESSIONS
- Authentication uses express-session with the cookie name 'platform.sid'.
- Protected request handlers call the requirePlatformSession middleware
  exported from middleware/session.js; they never read cookies directly.
- The session secret comes from process.env.SESSION_SECRET.

DATA
- Persistence is mongoose against process.env.MONGODB_URI.
- Every schema spreads the shared platformFields set exported from
  lib/db.js (ownerId, workspaceId, createdAt) in addition to its own
  fields. Queries scope by ownerId.

BRANDING
- Pages render inside the platform shell: PlatformNav at the top,
  styles/platform.css loaded globally, logo served from
  /platform-logo.svg.

FILE LAYOUT
- Middleware lives in middleware/, shared connectors in lib/, mongoose
  schemas in models/, HTTP routes in routes/, UI components in
  components/.
- The app listens on process.env.APP_PORT and is reached through the
  platform proxy; never hard-code ports or absolute origins.
";
