/*!
`route.rs`

Route commands: `getRoute`, `addRoutePoints`, `clearRoute`.

`getRoute` fetches one stored route (up to 4096 points) and prints each
point as `"px, py, speed, time"`, one per line, in the same numeric format
`addRoutePoints` accepts back on its input lines.

`addRoutePoints` reads its points from the input stream, not the command
line: exactly `<points>` further lines follow the command, each parsed as
`px , py , speed , time`. Malformed or missing fields zero-fill instead of
aborting the upload; command-line arguments stay strict.

The backend ignores the car id for stored-route operations, so `getRoute`
and `clearRoute` pass car 0.
*/

use std::io::Write;

use anyhow::Result;

use crate::repl::{Ctx, Flow};
use crate::station::RoutePoint;

use super::shared::{ROUTE_CAPACITY, Usage};

pub const GET_ROUTE: Usage = Usage {
    name: "getRoute",
    args: "<route> [timeoutms]",
};

pub const ADD_ROUTE_POINTS: Usage = Usage {
    name: "addRoutePoints",
    args: "<car> <replace> <mapOnly> <route> <points> [timeoutms]",
};

pub const CLEAR_ROUTE: Usage = Usage {
    name: "clearRoute",
    args: "<route> [timeoutms]",
};

pub fn get_route(ctx: &mut Ctx, tokens: &[&str]) -> Result<Flow> {
    if !(2..=3).contains(&tokens.len()) {
        return GET_ROUTE.wrong_count(ctx);
    }
    let Some(route) = GET_ROUTE.parse_i32(ctx, tokens[1])? else {
        return Ok(Flow::Continue);
    };
    let Some(timeout_ms) = GET_ROUTE.timeout(ctx, tokens, 2)? else {
        return Ok(Flow::Continue);
    };

    match ctx.station.route_points(0, route, ROUTE_CAPACITY, timeout_ms) {
        Some(points) => {
            for p in &points {
                writeln!(ctx.out, "{:.6}, {:.6}, {:.6}, {}", p.px, p.py, p.speed, p.time)?;
            }
        }
        None => writeln!(ctx.out, "Fail!")?,
    }
    Ok(Flow::Continue)
}

pub fn add_route_points(ctx: &mut Ctx, tokens: &[&str]) -> Result<Flow> {
    if !(6..=7).contains(&tokens.len()) {
        return ADD_ROUTE_POINTS.wrong_count(ctx);
    }
    let Some(car) = ADD_ROUTE_POINTS.parse_i32(ctx, tokens[1])? else {
        return Ok(Flow::Continue);
    };
    let Some(replace) = ADD_ROUTE_POINTS.parse_i32(ctx, tokens[2])? else {
        return Ok(Flow::Continue);
    };
    let Some(map_only) = ADD_ROUTE_POINTS.parse_i32(ctx, tokens[3])? else {
        return Ok(Flow::Continue);
    };
    let Some(route) = ADD_ROUTE_POINTS.parse_i32(ctx, tokens[4])? else {
        return Ok(Flow::Continue);
    };
    let Some(count) = ADD_ROUTE_POINTS.parse_i32(ctx, tokens[5])? else {
        return Ok(Flow::Continue);
    };
    let Some(timeout_ms) = ADD_ROUTE_POINTS.timeout(ctx, tokens, 6)? else {
        return Ok(Flow::Continue);
    };

    let mut points = Vec::with_capacity(count.max(0) as usize);
    for _ in 0..count {
        let mut line = String::new();
        if ctx.input.read_line(&mut line)? == 0 {
            // Input ended mid-upload; send what was read.
            break;
        }
        points.push(parse_point_line(&line));
    }

    let ok = ctx
        .station
        .add_route_points(car, &points, replace != 0, map_only != 0, route, timeout_ms);
    writeln!(ctx.out, "{}", if ok { "Success" } else { "Failed" })?;
    Ok(Flow::Continue)
}

pub fn clear_route(ctx: &mut Ctx, tokens: &[&str]) -> Result<Flow> {
    if !(2..=3).contains(&tokens.len()) {
        return CLEAR_ROUTE.wrong_count(ctx);
    }
    let Some(route) = CLEAR_ROUTE.parse_i32(ctx, tokens[1])? else {
        return Ok(Flow::Continue);
    };
    let Some(timeout_ms) = CLEAR_ROUTE.timeout(ctx, tokens, 2)? else {
        return Ok(Flow::Continue);
    };

    let ok = ctx.station.clear_route(0, route, timeout_ms);
    writeln!(ctx.out, "{}", if ok { "Success!" } else { "Failed!" })?;
    Ok(Flow::Continue)
}

/// Parse one `px , py , speed , time` line, zero-filling anything
/// malformed or missing.
fn parse_point_line(line: &str) -> RoutePoint {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let float = |i: usize| -> f64 { fields.get(i).and_then(|s| s.parse().ok()).unwrap_or(0.0) };
    RoutePoint {
        px: float(0),
        py: float(1),
        speed: float(2),
        time: fields.get(3).and_then(|s| s.parse().ok()).unwrap_or(0),
    }
}

/* ---- Tests ---- */
