//! End-to-end demonstration of the FactStore client API.
//!
//! Creates two people with typed scalar values, facets, and a geo location,
//! connects them with a facet-annotated edge, queries everything back, and
//! finally deletes the edge. Every error is fatal: the process logs it and
//! exits non-zero.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use factstore_client::{Client, ClientConfig, Geometry, NQuad, Op, Request, Value};
use factstore_core::{blank, Uid};

#[derive(Parser)]
#[command(name = "factstore-demo")]
#[command(about = "End-to-end demonstration of the FactStore client API")]
struct Cli {
    /// FactStore server address (host:port, default 127.0.0.1:8080).
    #[arg(short = 'd', long = "server")]
    server: Option<String>,

    /// Config file prefix (default: factstore).
    #[arg(short, long, default_value = "factstore")]
    config: String,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut client_config = load_client_config(&cli.config);
    if let Some(addr) = cli.server {
        client_config.addr = addr;
    }

    let client = Client::connect(&client_config)?;

    // Blank labels ask the server to assign fresh uids; the same label
    // cross-references a node within this one batch.
    let req = build_person_batch()?;
    let resp = client.run(req)?;

    let person1 = resp
        .assigned_uid("person1")
        .context("no uid assigned for person1")?;
    let person2 = resp
        .assigned_uid("person2")
        .context("no uid assigned for person2")?;
    tracing::info!(%person1, %person2, "Mutation applied");

    // Query the data back, starting from person1's freshly assigned uid.
    let mut req = Request::new();
    req.set_query(person_query(person1));
    let resp = client.run(req)?;
    println!("Raw response: {resp:#?}");

    let me = resp
        .nodes
        .first()
        .and_then(|root| root.child(0))
        .context("empty query response")?;

    let name = me
        .property("name")
        .and_then(Value::as_str)
        .context("name missing from response")?;
    println!("Name: {name}");

    // Date and datetime values come back as RFC 3339 strings.
    let now = parse_rfc3339(me, "now")?;
    println!("Now: {now}");
    let birthday = parse_rfc3339(me, "birthday")?;
    println!("Birthday: {birthday}");

    // The geo value comes back as WKB bytes.
    let wkb = me
        .property("loc")
        .and_then(Value::as_geo)
        .context("loc missing from response")?;
    let loc = Geometry::from_wkb(wkb)?;
    println!("Loc: {loc}");

    println!(
        "Salary: {}",
        me.property("salary")
            .and_then(Value::as_double)
            .context("salary missing from response")?
    );
    println!(
        "Age: {}",
        me.property("age")
            .and_then(Value::as_int)
            .context("age missing from response")?
    );
    println!(
        "Married: {}",
        me.property("married")
            .and_then(Value::as_bool)
            .context("married missing from response")?
    );

    let friend = me.child(0).context("no friend edge in response")?;
    println!(
        "{} name: {}",
        friend.attribute,
        friend
            .property("name")
            .and_then(Value::as_str)
            .context("friend name missing from response")?
    );

    // Delete the friend edge between the two assigned uids.
    let mut req = Request::new();
    req.add_mutation(
        NQuad::connect(person1.to_string(), "friend", person2.to_string()),
        Op::Del,
    )?;
    client.run(req)?;
    tracing::info!(%person1, %person2, "Deleted friend edge");

    Ok(())
}

/// The full demo batch: person1's scalar predicates, person2's name, and a
/// facet-annotated friend edge between them.
fn build_person_batch() -> anyhow::Result<Request> {
    let mut req = Request::new();

    let mut name = NQuad::new(blank("person1"), "name");
    name.set_str("Steven Spielberg");
    name.add_facet("since", "2006-01-02T15:04:05")?;
    // String facets keep their quotes in the raw literal; a Rust raw string
    // avoids escaping them.
    name.add_facet("alias", r#""Steve""#)?;
    req.add_mutation(name, Op::Set)?;

    let mut now = NQuad::new(blank("person1"), "now");
    now.set_datetime(Utc::now());
    req.add_mutation(now, Op::Set)?;

    let mut birthday = NQuad::new(blank("person1"), "birthday");
    birthday.set_date(NaiveDate::from_ymd_opt(1991, 2, 1).expect("1991-02-01 is a valid date"));
    req.add_mutation(birthday, Op::Set)?;

    let mut loc = NQuad::new(blank("person1"), "loc");
    loc.set_geo_json(r#"{"type":"Point","coordinates":[-122.2207184,37.72129059]}"#)?;
    req.add_mutation(loc, Op::Set)?;

    let mut age = NQuad::new(blank("person1"), "age");
    age.set_int(25);
    req.add_mutation(age, Op::Set)?;

    let mut salary = NQuad::new(blank("person1"), "salary");
    salary.set_double(13333.6161);
    req.add_mutation(salary, Op::Set)?;

    let mut married = NQuad::new(blank("person1"), "married");
    married.set_bool(false);
    req.add_mutation(married, Op::Set)?;

    let mut name2 = NQuad::new(blank("person2"), "name");
    name2.set_str("William Jones");
    req.add_mutation(name2, Op::Set)?;

    let mut friend = NQuad::connect(blank("person1"), "friend", blank("person2"));
    friend.add_facet("close", "true")?;
    req.add_mutation(friend, Op::Set)?;

    Ok(req)
}

/// Query every predicate set by the demo batch, plus friend edges.
fn person_query(uid: Uid) -> String {
    format!(
        "{{
            me(id: {uid}) {{
                _uid_
                name @facets
                now
                birthday
                loc
                salary
                age
                married
                friend @facets {{
                    _uid_
                    name
                }}
            }}
        }}"
    )
}

fn parse_rfc3339(
    node: &factstore_client::ResponseNode,
    prop: &str,
) -> anyhow::Result<DateTime<Utc>> {
    let raw = node
        .property(prop)
        .and_then(Value::as_str)
        .with_context(|| format!("{prop} missing from response"))?;
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("cannot parse {prop} as RFC 3339: {raw:?}"))?;
    Ok(parsed.with_timezone(&Utc))
}

fn load_client_config(file_prefix: &str) -> ClientConfig {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("FACTSTORE")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    match cfg {
        Ok(c) => {
            let defaults = ClientConfig::default();
            ClientConfig {
                addr: c.get_string("server.addr").unwrap_or(defaults.addr),
                timeout_secs: c
                    .get_int("server.timeout_secs")
                    .map(|t| t as u64)
                    .unwrap_or(defaults.timeout_secs),
            }
        }
        Err(_) => ClientConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_query_targets_the_uid() {
        let query = person_query(Uid(0x2a));
        assert!(query.contains("me(id: 0x2a)"));
        for predicate in ["name", "now", "birthday", "loc", "salary", "age", "married"] {
            assert!(query.contains(predicate), "missing predicate {predicate}");
        }
    }

    #[test]
    fn demo_batch_builds_cleanly() {
        let req = build_person_batch().unwrap();
        assert!(!req.is_empty());
    }
}
