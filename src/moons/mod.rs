//! N-body position/velocity simulation.
//!
//! Every pair of moons pulls each axis of the other's velocity one unit
//! toward itself each step; then every moon coasts. The three axes never
//! interact, which is what makes the cycle search tractable: each axis
//! repeats on its own short period and the system period is their lcm.

use std::cmp::Ordering;

use nom::bytes::complete::tag;
use nom::character::complete::{i64 as number, line_ending, multispace0};
use nom::combinator::map;
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded, terminated, tuple};
use nom::{Finish, IResult};
use rayon::prelude::*;
use thiserror::Error;

use crate::coord::Coord3;

/// A body with a position and the velocity gravity has imparted so far.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Moon {
    pub pos: Coord3,
    pub vel: Coord3,
}

impl Moon {
    pub fn at_rest(pos: Coord3) -> Moon {
        Moon {
            pos,
            vel: Coord3::default(),
        }
    }

    pub fn potential_energy(&self) -> i64 {
        self.pos.manhattan()
    }

    pub fn kinetic_energy(&self) -> i64 {
        self.vel.manhattan()
    }

    pub fn total_energy(&self) -> i64 {
        self.potential_energy() * self.kinetic_energy()
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("unparsable moon scan near {0:?}")]
pub struct ScanError(String);

fn moon(input: &str) -> IResult<&str, Moon> {
    let fields = tuple((
        preceded(tag("<x="), number),
        preceded(tag(", y="), number),
        preceded(tag(", z="), number),
    ));
    map(terminated(fields, tag(">")), |(x, y, z)| {
        Moon::at_rest(Coord3::new(x, y, z))
    })(input)
}

/// Parse a scan with one `<x=…, y=…, z=…>` line per moon.
pub fn parse(text: &str) -> Result<Vec<Moon>, ScanError> {
    let mut scan = delimited(multispace0, separated_list1(line_ending, moon), multispace0);
    match scan(text).finish() {
        Ok(("", moons)) => Ok(moons),
        Ok((rest, _)) => Err(ScanError(snippet(rest))),
        Err(err) => Err(ScanError(snippet(err.input))),
    }
}

fn snippet(text: &str) -> String {
    text.trim().chars().take(24).collect()
}

/// Unit attraction along one axis.
fn pull(from: i64, toward: i64) -> i64 {
    match from.cmp(&toward) {
        Ordering::Less => 1,
        Ordering::Greater => -1,
        Ordering::Equal => 0,
    }
}

/// One tick: gravity adjusts every velocity, then every moon coasts.
pub fn step(moons: &mut [Moon]) {
    for a in 0..moons.len() {
        for b in 0..moons.len() {
            if a == b {
                continue;
            }
            let nudge = Coord3::new(
                pull(moons[a].pos.x, moons[b].pos.x),
                pull(moons[a].pos.y, moons[b].pos.y),
                pull(moons[a].pos.z, moons[b].pos.z),
            );
            moons[a].vel = moons[a].vel + nudge;
        }
    }
    for moon in moons.iter_mut() {
        moon.pos = moon.pos + moon.vel;
    }
}

/// Total system energy after `steps` ticks.
pub fn total_energy(mut moons: Vec<Moon>, steps: usize) -> i64 {
    for _ in 0..steps {
        step(&mut moons);
    }
    moons.iter().map(Moon::total_energy).sum()
}

/// One moon's position and velocity along a single axis.
#[derive(Copy, Clone, Eq, PartialEq)]
struct Axis {
    pos: i64,
    vel: i64,
}

/// Steps until one axis of the system first revisits its starting state.
fn axis_cycle(start: &[Axis]) -> u64 {
    let mut state = start.to_vec();
    let mut steps = 0u64;
    loop {
        for a in 0..state.len() {
            for b in 0..state.len() {
                if a != b {
                    state[a].vel += pull(state[a].pos, state[b].pos);
                }
            }
        }
        for axis in state.iter_mut() {
            axis.pos += axis.vel;
        }
        steps += 1;
        if state == start {
            return steps;
        }
    }
}

/// Steps until the whole system first revisits its starting state.
pub fn cycle_length(moons: &[Moon]) -> u64 {
    let axes: Vec<Vec<Axis>> = vec![
        moons
            .iter()
            .map(|m| Axis {
                pos: m.pos.x,
                vel: m.vel.x,
            })
            .collect(),
        moons
            .iter()
            .map(|m| Axis {
                pos: m.pos.y,
                vel: m.vel.y,
            })
            .collect(),
        moons
            .iter()
            .map(|m| Axis {
                pos: m.pos.z,
                vel: m.vel.z,
            })
            .collect(),
    ];
    axes.par_iter()
        .map(|axis| axis_cycle(axis))
        .reduce(|| 1, lcm)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}
