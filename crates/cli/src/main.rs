use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nefasto::api::{
    all_paths, connect_same_frequency, derive, load_from_text, place_checked, random_registry,
    read_dump, render_map, traverse, write_dump, AcceptPolicy, LoadCfg, LoadedMap, NefastoPolicy,
    PathCfg, RandomLayoutCfg, RegistryOrder, SearchKind,
};
use nefasto::{Antenna, Bounds, Frequency, Pos, Registry};
use serde::Serialize;
use serde_json::json;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod export;
mod provenance;
mod report;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "nefasto")]
#[command(about = "Antenna maps: nefasto points, same-frequency networks and dumps")]
struct Cmd {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// List the antennas of a map
    Scan {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long)]
        json: bool,
    },
    /// List the nefasto points of a map
    Nefasto {
        #[command(flatten)]
        map: MapArgs,
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long)]
        json: bool,
    },
    /// Print (or write) the map with nefasto cells marked `#`
    Render {
        #[command(flatten)]
        map: MapArgs,
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Add an antenna unless the cell is taken, off-grid, nefasto or interfering
    Place {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long)]
        freq: char,
        #[arg(long, value_parser = parse_pos)]
        at: Pos,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Write the antennas as 9-byte binary records
    Dump {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Read a binary dump back and list it
    Restore {
        #[arg(long)]
        dump: PathBuf,
        #[arg(long, value_enum, default_value_t = OrderArg::Sorted)]
        order: OrderArg,
        #[arg(long)]
        json: bool,
    },
    /// Walk the same-frequency network from one antenna
    Search {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long, value_parser = parse_pos)]
        from: Pos,
        #[arg(long)]
        bfs: bool,
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long)]
        json: bool,
    },
    /// List simple paths between two antennas
    Paths {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long, value_parser = parse_pos)]
        from: Pos,
        #[arg(long, value_parser = parse_pos)]
        to: Pos,
        #[arg(long, default_value_t = PathCfg::default().max_paths)]
        max_paths: usize,
        /// Give up after this many path extensions
        #[arg(long, default_value_t = PathCfg::default().max_steps)]
        max_steps: usize,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Export antennas and nefasto points as CSV or Parquet (by extension)
    Export {
        #[command(flatten)]
        map: MapArgs,
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a seeded random antenna map
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = RandomLayoutCfg::default().antennas)]
        antennas: usize,
        #[arg(long, default_value_t = RandomLayoutCfg::default().frequencies)]
        frequencies: u8,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone)]
struct MapArgs {
    /// Text map; one row per line, `.` for empty cells
    #[arg(long)]
    map: PathBuf,
    #[arg(long, value_enum, default_value_t = AcceptArg::Letters)]
    accept: AcceptArg,
    #[arg(long, value_enum, default_value_t = OrderArg::Sorted)]
    order: OrderArg,
}

impl MapArgs {
    fn cfg(&self) -> LoadCfg {
        LoadCfg {
            accept: self.accept.into(),
            order: self.order.into(),
        }
    }

    fn params(&self) -> serde_json::Value {
        json!({
            "map": self.map.to_string_lossy(),
            "accept": format!("{:?}", self.accept),
            "order": format!("{:?}", self.order),
        })
    }
}

#[derive(Args, Clone, Copy, Default)]
struct GridArgs {
    /// Keep only points inside the grid (map extent unless overridden)
    #[arg(long)]
    bounded: bool,
    #[arg(long)]
    max_x: Option<i32>,
    #[arg(long)]
    max_y: Option<i32>,
}

impl GridArgs {
    fn bounds(&self, extent: Bounds) -> Bounds {
        Bounds::new(
            self.max_x.unwrap_or(extent.max_x),
            self.max_y.unwrap_or(extent.max_y),
        )
    }

    fn policy(&self, extent: Bounds) -> NefastoPolicy {
        if self.bounded {
            NefastoPolicy::Bounded(self.bounds(extent))
        } else {
            NefastoPolicy::Unbounded
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AcceptArg {
    Letters,
    Any,
}

impl From<AcceptArg> for AcceptPolicy {
    fn from(a: AcceptArg) -> Self {
        match a {
            AcceptArg::Letters => AcceptPolicy::Letters,
            AcceptArg::Any => AcceptPolicy::AnyGlyph,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    Sorted,
    Append,
    Prepend,
}

impl From<OrderArg> for RegistryOrder {
    fn from(o: OrderArg) -> Self {
        match o {
            OrderArg::Sorted => RegistryOrder::Sorted,
            OrderArg::Append => RegistryOrder::Append,
            OrderArg::Prepend => RegistryOrder::Prepend,
        }
    }
}

fn parse_pos(s: &str) -> std::result::Result<Pos, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("x: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("y: {e}"))?;
    Ok(Pos::new(x, y))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    init_logging(cmd.verbose);
    match cmd.action {
        Action::Scan { map, json } => scan(&map, json),
        Action::Nefasto { map, grid, json } => nefasto_points(&map, grid, json),
        Action::Render { map, grid, out } => render(&map, grid, out.as_deref()),
        Action::Place {
            map,
            freq,
            at,
            grid,
        } => place(&map, freq, at, grid),
        Action::Dump { map, out } => dump(&map, &out),
        Action::Restore { dump, order, json } => restore(&dump, order, json),
        Action::Search {
            map,
            from,
            bfs,
            grid,
            json,
        } => search(&map, from, bfs, grid, json),
        Action::Paths {
            map,
            from,
            to,
            max_paths,
            max_steps,
            grid,
        } => paths(
            &map,
            from,
            to,
            PathCfg {
                max_paths,
                max_steps,
            },
            grid,
        ),
        Action::Export { map, grid, out } => export_table(&map, grid, &out),
        Action::Random {
            seed,
            antennas,
            frequencies,
            out,
        } => random(seed, antennas, frequencies, out.as_deref()),
        Action::Report => report(),
    }
}

fn read_map(args: &MapArgs) -> Result<(String, LoadedMap)> {
    let text = fs::read_to_string(&args.map)
        .with_context(|| format!("reading map {}", args.map.display()))?;
    let loaded = load_from_text(&text, args.cfg())
        .with_context(|| format!("loading map {}", args.map.display()))?;
    tracing::info!(
        map = %args.map.display(),
        antennas = loaded.registry.len(),
        rows = loaded.extent.max_x,
        cols = loaded.extent.max_y,
        "map loaded"
    );
    Ok((text, loaded))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn scan(args: &MapArgs, as_json: bool) -> Result<()> {
    let (_, map) = read_map(args)?;
    if as_json {
        return print_json(&report::antenna_rows(&map.registry));
    }
    print!("{}", report::antenna_table(&map.registry));
    Ok(())
}

fn nefasto_points(args: &MapArgs, grid: GridArgs, as_json: bool) -> Result<()> {
    let (_, map) = read_map(args)?;
    let points = derive(&map.registry, grid.policy(map.extent));
    tracing::info!(points = points.len(), bounded = grid.bounded, "nefasto derived");
    if as_json {
        return print_json(&report::point_rows(&points));
    }
    print!("{}", report::point_table(&points));
    Ok(())
}

fn render(args: &MapArgs, grid: GridArgs, out: Option<&Path>) -> Result<()> {
    let (text, map) = read_map(args)?;
    let points = derive(&map.registry, grid.policy(map.extent));
    let marked = render_map(&text, points.iter());
    match out {
        Some(path) => {
            write_text(path, &marked)?;
            let mut params = args.params();
            params["bounded"] = json!(grid.bounded);
            params["points"] = json!(points.len());
            write_sidecar(path, Payload::new(params).with_input(&args.map))?;
            tracing::info!(out = %path.display(), "marked map written");
        }
        None => print!("{marked}"),
    }
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn place(args: &MapArgs, freq: char, at: Pos, grid: GridArgs) -> Result<()> {
    let (text, mut map) = read_map(args)?;
    let frequency = Frequency::try_from(freq)?;
    let bounds = grid.bounds(map.extent);
    place_checked(&mut map.registry, Antenna::new(frequency, at.x, at.y), bounds)
        .with_context(|| format!("placing {frequency} at {at}"))?;
    tracing::info!(%frequency, %at, antennas = map.registry.len(), "antenna placed");
    print!("{}", place_glyph(&text, at, frequency));
    Ok(())
}

/// Copy of `text` with the cell at `at` set to the frequency glyph.
///
/// Rows and columns missing from `text` are filled in first: short rows are
/// padded with `.`, missing rows are added empty.
fn place_glyph(text: &str, at: Pos, frequency: Frequency) -> String {
    let (Ok(x), Ok(y)) = (usize::try_from(at.x), usize::try_from(at.y)) else {
        return text.to_string();
    };
    let body = text.strip_suffix('\n').unwrap_or(text);
    let mut rows: Vec<Vec<char>> = if text.is_empty() {
        Vec::new()
    } else {
        body.split('\n').map(|l| l.chars().collect()).collect()
    };
    if rows.len() <= x {
        rows.resize(x + 1, Vec::new());
    }
    let row = &mut rows[x];
    if row.len() <= y {
        row.resize(y + 1, '.');
    }
    row[y] = frequency.as_char();
    let mut out = String::with_capacity(text.len() + y + 2);
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    if !text.is_empty() && !text.ends_with('\n') {
        out.pop();
    }
    out
}

fn dump(args: &MapArgs, out: &Path) -> Result<()> {
    let (_, map) = read_map(args)?;
    ensure_parent(out)?;
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let mut w = BufWriter::new(file);
    let records = write_dump(&map.registry, &mut w)?;
    w.flush()?;
    write_sidecar(
        out,
        Payload::new(json!({ "load": args.params(), "records": records })).with_input(&args.map),
    )?;
    tracing::info!(records, out = %out.display(), "dump written");
    Ok(())
}

fn restore(path: &Path, order: OrderArg, as_json: bool) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening dump {}", path.display()))?;
    let reg = read_dump(BufReader::new(file), order.into())
        .with_context(|| format!("reading dump {}", path.display()))?;
    tracing::info!(antennas = reg.len(), "dump restored");
    if as_json {
        return print_json(&report::antenna_rows(&reg));
    }
    print!("{}", report::antenna_table(&reg));
    Ok(())
}

fn network(args: &MapArgs) -> Result<LoadedMap> {
    let (_, mut map) = read_map(args)?;
    let edges = connect_same_frequency(&mut map.registry);
    tracing::debug!(edges, "network connected");
    Ok(map)
}

fn search(args: &MapArgs, from: Pos, bfs: bool, grid: GridArgs, as_json: bool) -> Result<()> {
    let map = network(args)?;
    let kind = if bfs {
        SearchKind::BreadthFirst
    } else {
        SearchKind::DepthFirst
    };
    let t = traverse(&map.registry, from, grid.bounds(map.extent), kind);
    if t.is_empty() {
        tracing::warn!(%from, "no antenna at start inside the grid");
    }
    if as_json {
        return print_json(&report::visit_rows(&t));
    }
    print!("{}", report::visit_table(&t));
    Ok(())
}

fn paths(args: &MapArgs, from: Pos, to: Pos, cfg: PathCfg, grid: GridArgs) -> Result<()> {
    let map = network(args)?;
    let found = all_paths(
        &map.registry,
        from,
        to,
        grid.bounds(map.extent),
        cfg,
    );
    tracing::info!(%from, %to, paths = found.len(), "paths enumerated");
    if found.is_empty() {
        println!("no path from {from} to {to}");
    }
    for path in &found {
        println!("{}", report::path_line(path));
    }
    Ok(())
}

fn export_table(args: &MapArgs, grid: GridArgs, out: &Path) -> Result<()> {
    let (_, map) = read_map(args)?;
    let points = derive(&map.registry, grid.policy(map.extent));
    let mut df = export::table(&map.registry, &points)?;
    let format = export::write_table(&mut df, out)?;
    let mut params = args.params();
    params["bounded"] = json!(grid.bounded);
    params["format"] = json!(format!("{format:?}"));
    write_sidecar(out, Payload::new(params).with_input(&args.map))?;
    Ok(())
}

fn random(seed: u64, antennas: usize, frequencies: u8, out: Option<&Path>) -> Result<()> {
    let cfg = RandomLayoutCfg {
        antennas,
        frequencies,
        ..RandomLayoutCfg::default()
    };
    let reg = random_registry(cfg, seed);
    let text = layout_text(&reg, cfg.bounds);
    match out {
        Some(path) => {
            write_text(path, &text)?;
            write_sidecar(
                path,
                Payload::new(json!({ "seed": seed, "antennas": reg.len(), "frequencies": frequencies })),
            )?;
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Text map of `reg` on a `bounds`-sized grid of `.` cells.
fn layout_text(reg: &Registry, bounds: Bounds) -> String {
    let cols = bounds.max_y.max(0) as usize;
    let mut grid = vec![vec!['.'; cols]; bounds.max_x.max(0) as usize];
    for a in reg.iter() {
        if let Some(row) = grid.get_mut(a.pos.x as usize) {
            if let Some(cell) = row.get_mut(a.pos.y as usize) {
                *cell = a.frequency.as_char();
            }
        }
    }
    let mut text = String::with_capacity(grid.len() * (cols + 1));
    for row in grid {
        text.extend(row);
        text.push('\n');
    }
    text
}

fn report() -> Result<()> {
    let doc = json!({
        "code_rev": provenance::code_rev(),
        "nefasto_version": nefasto::VERSION,
        "cli_version": env!("CARGO_PKG_VERSION"),
    });
    print_json(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nefasto::api::load_from_path;
    use tempfile::tempdir;

    fn map_args(path: &Path) -> MapArgs {
        MapArgs {
            map: path.to_path_buf(),
            accept: AcceptArg::Letters,
            order: OrderArg::Sorted,
        }
    }

    #[test]
    fn parse_pos_accepts_pairs() {
        assert_eq!(parse_pos("3,4").unwrap(), Pos::new(3, 4));
        assert_eq!(parse_pos(" -1 , 2").unwrap(), Pos::new(-1, 2));
        assert!(parse_pos("3").is_err());
        assert!(parse_pos("a,b").is_err());
    }

    #[test]
    fn grid_args_override_extent() {
        let extent = Bounds::new(4, 6);
        let grid = GridArgs {
            bounded: true,
            max_x: Some(2),
            max_y: None,
        };
        assert_eq!(grid.bounds(extent), Bounds::new(2, 6));
        assert!(matches!(
            grid.policy(extent),
            NefastoPolicy::Bounded(b) if b == Bounds::new(2, 6)
        ));
        assert!(matches!(
            GridArgs::default().policy(extent),
            NefastoPolicy::Unbounded
        ));
    }

    #[test]
    fn render_writes_marked_map_and_sidecar() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("map.txt");
        fs::write(&src, "....\n.A..\n..A.\n....\n").unwrap();
        let out = dir.path().join("out/marked.txt");
        let grid = GridArgs {
            bounded: true,
            ..GridArgs::default()
        };
        render(&map_args(&src), grid, Some(&out)).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "#...\n.A..\n..A.\n...#\n"
        );
        assert!(dir.path().join("out/marked.provenance.json").exists());
    }

    #[test]
    fn dump_then_restore_keeps_antennas() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("map.txt");
        fs::write(&src, "A..\n.b.\n..A\n").unwrap();
        let bin = dir.path().join("antennas.bin");
        dump(&map_args(&src), &bin).unwrap();
        assert_eq!(fs::metadata(&bin).unwrap().len(), 27);
        assert!(dir.path().join("antennas.provenance.json").exists());

        let file = File::open(&bin).unwrap();
        let back = read_dump(BufReader::new(file), RegistryOrder::Sorted).unwrap();
        let loaded = load_from_path(&src, LoadCfg::default()).unwrap();
        assert_eq!(
            report::antenna_rows(&back),
            report::antenna_rows(&loaded.registry)
        );
        restore(&bin, OrderArg::Append, true).unwrap();
    }

    #[test]
    fn missing_map_reports_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let err = scan(&map_args(&missing), false).unwrap_err();
        assert!(format!("{err:#}").contains("nope.txt"));
    }

    #[test]
    fn place_glyph_replaces_one_cell() {
        let f = Frequency::try_from('Z').unwrap();
        assert_eq!(place_glyph("...\n...\n", Pos::new(1, 2), f), "...\n..Z\n");
        assert_eq!(place_glyph("...\n", Pos::new(0, 4), f), "....Z\n");
        assert_eq!(place_glyph("..\n", Pos::new(2, 1), f), "..\n\n.Z\n");
        assert_eq!(place_glyph("A.\r\nB", Pos::new(1, 0), f), "A.\r\nZ");
    }

    #[test]
    fn place_rejects_nefasto_cell() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("map.txt");
        fs::write(&src, "....\n.A..\n..A.\n....\n").unwrap();
        let args = map_args(&src);
        assert!(place(&args, 'A', Pos::new(0, 0), GridArgs::default()).is_err());
        assert!(place(&args, 'A', Pos::new(1, 1), GridArgs::default()).is_err());
        assert!(place(&args, 'A', Pos::new(9, 9), GridArgs::default()).is_err());
        assert!(place(&args, 'B', Pos::new(0, 0), GridArgs::default()).is_ok());

        let row = dir.path().join("row.txt");
        fs::write(&row, "AA....\n").unwrap();
        let args = map_args(&row);
        let err = place(&args, 'A', Pos::new(0, 3), GridArgs::default()).unwrap_err();
        assert!(format!("{err:#}").contains("interfere"));
        assert!(place(&args, 'A', Pos::new(0, 5), GridArgs::default()).is_ok());
    }

    #[test]
    fn random_layout_roundtrips_through_loader() {
        let cfg = RandomLayoutCfg::default();
        let reg = random_registry(cfg, 7);
        let text = layout_text(&reg, cfg.bounds);
        let loaded = load_from_text(&text, LoadCfg::default()).unwrap();
        assert_eq!(loaded.extent, cfg.bounds);
        assert_eq!(
            report::antenna_rows(&loaded.registry),
            report::antenna_rows(&reg)
        );
    }
}
