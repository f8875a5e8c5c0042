//! Open the store for a run and translate driver-style MySQL DSNs into URLs.

use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use url::Url;

use super::{DryRunStore, MySqlStore, SensorStore, SqliteStore};
use crate::engine::translate::Dialect;
use crate::utils::config::DEFAULT_MYSQL_ADDR;
use crate::{Opts, Target};

/// Open the single store used for the whole run. Dry runs never connect.
pub fn open_store(opts: &Opts) -> Result<Box<dyn SensorStore>> {
    if opts.dry_run {
        let dialect = match opts.target {
            Some(Target::Sqlite(_)) => Dialect::Sqlite,
            _ => Dialect::MySql,
        };
        return Ok(Box::new(DryRunStore::new(dialect)));
    }
    match &opts.target {
        None => bail!(
            "no database configured; pass --mysql-dsn, --sqlite-db, or set {}",
            crate::utils::PackagePaths::get().dsn_env_key()
        ),
        Some(Target::MySql(dsn)) => Ok(Box::new(MySqlStore::connect(dsn)?)),
        Some(Target::Sqlite(path)) => Ok(Box::new(SqliteStore::open(path)?)),
    }
}

/// Convert a DSN to a `mysql://` URL.
///
/// URLs pass through unchanged. Driver-style DSNs (`user:pass@tcp(host:port)/db?params`,
/// `user@unix(/run/mysqld.sock)/db`) are rebuilt with credentials percent-encoded; their
/// query parameters (`charset`, `parseTime`, ...) have no URL equivalent and are dropped.
pub fn dsn_to_url(dsn: &str) -> Result<Url> {
    let dsn = dsn.trim();
    if dsn.is_empty() {
        bail!("MySQL DSN is empty");
    }
    if dsn.starts_with("mysql://") {
        return Url::parse(dsn).context("parse MySQL URL");
    }

    let slash = dsn
        .rfind('/')
        .ok_or_else(|| anyhow!("invalid MySQL DSN: missing '/<dbname>'"))?;
    let (head, tail) = (&dsn[..slash], &dsn[slash + 1..]);
    let (db_name, params) = tail.split_once('?').unwrap_or((tail, ""));
    if !params.is_empty() {
        debug!("Ignoring driver DSN parameters: {}", params);
    }

    let (creds, net) = match head.rfind('@') {
        Some(i) => (Some(&head[..i]), &head[i + 1..]),
        None => (None, head),
    };
    let (proto, addr) = match net.find('(') {
        Some(i) => {
            let addr = net[i + 1..]
                .strip_suffix(')')
                .ok_or_else(|| anyhow!("invalid MySQL DSN: unclosed address in {:?}", net))?;
            (&net[..i], addr)
        }
        None => (net, ""),
    };

    let mut url = Url::parse("mysql://localhost").context("build MySQL URL")?;
    match proto {
        "" | "tcp" => {
            let addr = if addr.is_empty() {
                DEFAULT_MYSQL_ADDR
            } else {
                addr
            };
            let (host, port) = match addr.rsplit_once(':') {
                Some((h, p)) => {
                    let port: u16 = p
                        .parse()
                        .with_context(|| format!("invalid MySQL port {:?}", p))?;
                    (h, Some(port))
                }
                None => (addr, None),
            };
            url.set_host(Some(host))
                .with_context(|| format!("invalid MySQL host {:?}", host))?;
            url.set_port(port)
                .map_err(|_| anyhow!("cannot set MySQL port"))?;
        }
        "unix" => {
            url.query_pairs_mut().append_pair("socket", addr);
        }
        other => bail!("unsupported MySQL DSN protocol {:?}", other),
    }

    if let Some(creds) = creds {
        let (user, pass) = match creds.split_once(':') {
            Some((u, p)) => (u, Some(p)),
            None => (creds, None),
        };
        url.set_username(user)
            .map_err(|_| anyhow!("cannot set MySQL user"))?;
        url.set_password(pass)
            .map_err(|_| anyhow!("cannot set MySQL password"))?;
    }
    url.set_path(&format!("/{db_name}"));
    Ok(url)
}
