//! Console tables and JSON rows for the command outputs.

use nefasto::api::{NefastoPoints, Traversal};
use nefasto::{Pos, Registry};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AntennaRow {
    pub frequency: char,
    pub x: i32,
    pub y: i32,
    pub adjacent: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PointRow {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VisitRow {
    pub step: usize,
    pub frequency: char,
    pub x: i32,
    pub y: i32,
}

pub fn antenna_rows(reg: &Registry) -> Vec<AntennaRow> {
    reg.iter()
        .map(|a| AntennaRow {
            frequency: a.frequency.as_char(),
            x: a.pos.x,
            y: a.pos.y,
            adjacent: a.adjacency().len(),
        })
        .collect()
}

pub fn point_rows(points: &NefastoPoints) -> Vec<PointRow> {
    points.iter().map(|p| PointRow { x: p.x, y: p.y }).collect()
}

pub fn visit_rows(t: &Traversal<'_>) -> Vec<VisitRow> {
    t.iter()
        .enumerate()
        .map(|(step, v)| VisitRow {
            step,
            frequency: v.antenna.frequency.as_char(),
            x: v.pos.x,
            y: v.pos.y,
        })
        .collect()
}

pub fn antenna_table(reg: &Registry) -> String {
    if reg.is_empty() {
        return "no antennas\n".to_string();
    }
    let mut out = String::from("freq |    x |    y | adj\n-----+------+------+----\n");
    for row in antenna_rows(reg) {
        let _ = writeln!(
            out,
            "{:>4} | {:>4} | {:>4} | {:>3}",
            row.frequency, row.x, row.y, row.adjacent
        );
    }
    out
}

pub fn point_table(points: &NefastoPoints) -> String {
    if points.is_empty() {
        return "no nefasto points\n".to_string();
    }
    let mut out = String::from("   x |    y\n-----+-----\n");
    for p in points.iter() {
        let _ = writeln!(out, "{:>4} | {:>4}", p.x, p.y);
    }
    out
}

pub fn visit_table(t: &Traversal<'_>) -> String {
    let mut out = String::new();
    for row in visit_rows(t) {
        let _ = writeln!(
            out,
            "{:>3}. {} ({}, {})",
            row.step, row.frequency, row.x, row.y
        );
    }
    out
}

pub fn path_line(path: &[Pos]) -> String {
    path.iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
