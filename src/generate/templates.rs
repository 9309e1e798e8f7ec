//! Fixed template text for the generated integration artifacts.
//!
//! Templates are versionless text assets keyed by output filename. The
//! generator's contract is the set of filenames and semantic types it
//! produces, not the literal markup here. Placeholders use `{{name}}`
//! and are substituted verbatim; rendering the same inputs twice yields
//! byte-identical output.

/// Substitutes `{{key}}` placeholders in a template.
#[must_use]
pub fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in substitutions {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}

/// Lower-cases and hyphenates an app name for use in paths and URLs.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "app".to_string()
    } else {
        slug
    }
}

/// Session middleware wired to express-session and the shared Mongo store.
pub const SESSION_MIDDLEWARE: &str = r"// Platform session middleware for {{app_name}}.
const session = require('express-session');
const MongoStore = require('connect-mongo');

const platformSession = session({
  name: 'platform.sid',
  secret: process.env.SESSION_SECRET,
  resave: false,
  saveUninitialized: false,
  store: MongoStore.create({ mongoUrl: process.env.MONGODB_URI }),
  cookie: { httpOnly: true, sameSite: 'lax' },
});

function requirePlatformSession(req, res, next) {
  if (!req.session || !req.session.userId) {
    return res.status(401).json({ error: 'Not authenticated' });
  }
  return next();
}

module.exports = { platformSession, requirePlatformSession };
";

/// Database connector exposing the shared platform field set.
pub const DATABASE_CONNECTOR: &str = r"// Shared mongoose connection for {{app_name}}.
const mongoose = require('mongoose');

// Every embedded app document carries these fields.
const platformFields = {
  ownerId: { type: String, index: true, required: true },
  workspaceId: { type: String, index: true },
  createdAt: { type: Date, default: Date.now },
};

let connection = null;

async function connectPlatformDb() {
  if (!connection) {
    connection = await mongoose.connect(process.env.MONGODB_URI);
  }
  return connection;
}

module.exports = { connectPlatformDb, platformFields };
";

/// Per-model schema file extending the shared platform fields.
pub const MODEL_FILE: &str = r"const mongoose = require('mongoose');
const { platformFields } = require('../lib/db');

const {{model_name}}Schema = new mongoose.Schema({
  ...platformFields,
});

module.exports =
  mongoose.models.{{model_name}} ||
  mongoose.model('{{model_name}}', {{model_name}}Schema{{collection_arg}});
";

/// Platform logo placeholder.
pub const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 160 40" role="img">
  <title>{{app_name}}</title>
  <rect width="160" height="40" rx="8" fill="#1a1a2e" />
  <text x="80" y="26" text-anchor="middle" fill="#e4e4f0" font-family="sans-serif" font-size="16">
    {{app_name}}
  </text>
</svg>
"##;

/// Platform navigation component.
pub const NAVIGATION: &str = r#"// Platform navigation bar for {{app_name}}.
export default function PlatformNav() {
  return (
    <nav className="platform-nav">
      <a className="platform-nav-home" href="/">
        <img src="/platform-logo.svg" alt="{{app_name}}" height="28" />
      </a>
      <div className="platform-nav-links">
        <a href="/{{app_slug}}">{{app_name}}</a>
        <a href="/account">Account</a>
      </div>
    </nav>
  );
}
"#;

/// Platform stylesheet.
pub const STYLESHEET: &str = r".platform-nav {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.5rem 1.25rem;
  background: #1a1a2e;
  color: #e4e4f0;
}

.platform-nav a {
  color: inherit;
  text-decoration: none;
  margin-left: 1rem;
}

.platform-landing {
  max-width: 42rem;
  margin: 4rem auto;
  font-family: sans-serif;
}
";

/// Proxy route forwarding platform traffic to the embedded app.
pub const PROXY_ROUTE: &str = r"// Forwards /{{app_slug}}/* to the embedded app.
const express = require('express');
const router = express.Router();

const APP_PORT = process.env.APP_PORT || {{port}};

router.all('/{{app_slug}}/*', async (req, res) => {
  const suffix = req.originalUrl.replace('/{{app_slug}}', '') || '/';
  const target = `http://127.0.0.1:${APP_PORT}${suffix}`;
  try {
    const response = await fetch(target, {
      method: req.method,
      headers: { ...req.headers, host: `127.0.0.1:${APP_PORT}` },
      body: ['GET', 'HEAD'].includes(req.method) ? undefined : req,
      duplex: 'half',
    });
    res.status(response.status);
    response.headers.forEach((value, name) => res.setHeader(name, value));
    res.send(Buffer.from(await response.arrayBuffer()));
  } catch (err) {
    res.status(502).json({ error: 'embedded app unreachable', detail: String(err) });
  }
});

module.exports = router;
";

/// Landing page component for the platform catalog.
pub const LANDING_PAGE: &str = r#"// Catalog landing page for {{app_name}}.
export default function LandingPage() {
  return (
    <main className="platform-landing">
      <h1>{{app_name}}</h1>
      <p className="platform-category">{{category}}</p>
      <p>{{description}}</p>
      <a className="platform-launch" href="/{{app_slug}}">
        Open {{app_name}}
      </a>
    </main>
  );
}
"#;

/// Environment file naming the three required variables.
pub const ENV_CONFIG: &str = r"# Integration environment for {{app_name}}.
SESSION_SECRET=change-me
MONGODB_URI=mongodb://127.0.0.1:27017/platform
APP_PORT={{port}}
";

/// Integration documentation handed to the operator.
pub const DOCUMENTATION: &str = r"# Integrating {{app_name}}

Generated integration artifacts for embedding **{{app_name}}** into the
platform. Nothing in the original app tree was modified.

## What was generated

{{artifact_list}}

## Wiring it up

1. Review `package.platform.json` and fold its dependencies and scripts
   into your live `package.json`.
2. Copy `.env.integration` values into your environment and change
   `SESSION_SECRET`.
3. Mount `middleware/session.js` before any protected route.
4. Replace ad-hoc database connections with `lib/db.js` so documents
   carry the shared platform fields.
5. Mount `routes/proxy.js` in the platform shell; it forwards
   `/{{app_slug}}/*` to the app on port {{port}}.
";
