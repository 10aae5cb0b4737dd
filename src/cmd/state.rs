/*!
`state.rs`

`getState`: request one car's telemetry record and print every field in the
fixed order the station reports them. Integers print as plain decimals,
floats as fixed-point with six digits, so any printed value feeds back
through the same number parsing used elsewhere in the shell.
*/

use std::io::Write;

use anyhow::Result;

use crate::repl::{Ctx, Flow};
use crate::station::CarState;

use super::shared::Usage;

pub const GET_STATE: Usage = Usage {
    name: "getState",
    args: "<car> [timeoutms]",
};

pub fn get_state(ctx: &mut Ctx, tokens: &[&str]) -> Result<Flow> {
    if !(2..=3).contains(&tokens.len()) {
        return GET_STATE.wrong_count(ctx);
    }
    let Some(car) = GET_STATE.parse_i32(ctx, tokens[1])? else {
        return Ok(Flow::Continue);
    };
    let Some(timeout_ms) = GET_STATE.timeout(ctx, tokens, 2)? else {
        return Ok(Flow::Continue);
    };

    match ctx.station.state(car, timeout_ms) {
        Some(state) => render_state(ctx.out, &state)?,
        None => writeln!(ctx.out, "Fail!")?,
    }
    Ok(Flow::Continue)
}

/// Print the telemetry record one field per line, wire order.
fn render_state(out: &mut dyn Write, s: &CarState) -> Result<()> {
    writeln!(out, "FW_MAJOR: {}", s.fw_major)?;
    writeln!(out, "FW_MINOR: {}", s.fw_minor)?;
    writeln!(out, "ROLL: {:.6}", s.roll)?;
    writeln!(out, "PITCH: {:.6}", s.pitch)?;
    writeln!(out, "YAW: {:.6}", s.yaw)?;
    writeln!(
        out,
        "ACCEL: ({:.6} : {:.6} : {:.6})",
        s.accel[0], s.accel[1], s.accel[2]
    )?;
    writeln!(
        out,
        "GYRO: ({:.6} : {:.6} : {:.6})",
        s.gyro[0], s.gyro[1], s.gyro[2]
    )?;
    writeln!(
        out,
        "MAG: ({:.6} : {:.6} : {:.6})",
        s.mag[0], s.mag[1], s.mag[2]
    )?;
    writeln!(out, "PX: {:.6}", s.px)?;
    writeln!(out, "PY: {:.6}", s.py)?;
    writeln!(out, "SPEED: {:.6}", s.speed)?;
    writeln!(out, "VIN: {:.6}", s.vin)?;
    writeln!(out, "TEMP_FET: {:.6}", s.temp_fet)?;
    writeln!(out, "MC_FAULT: {}", s.mc_fault)?;
    writeln!(out, "PX_GPS: {:.6}", s.px_gps)?;
    writeln!(out, "PY_GPS: {:.6}", s.py_gps)?;
    writeln!(out, "AP_GOAL_PX: {:.6}", s.ap_goal_px)?;
    writeln!(out, "AP_GOAL_PY: {:.6}", s.ap_goal_py)?;
    writeln!(out, "AP_RAD: {:.6}", s.ap_rad)?;
    writeln!(out, "MS_TODAY: {}", s.ms_today)?;
    writeln!(out, "AP_ROUTE_LEFT: {}", s.ap_route_left)?;
    writeln!(out, "PX_UWB: {:.6}", s.px_uwb)?;
    writeln!(out, "PY_UWB: {:.6}", s.py_uwb)?;
    Ok(())
}

/* ---- Tests ---- */

#[cfg(test)]
mod tests {
    use crate::repl::Flow;
    use crate::repl::testing::exec_line;
    use crate::station::{CarState, SimStation, Station as _};

    fn connected_sim() -> SimStation {
        let mut sim = SimStation::new();
        assert!(sim.connect("localhost", 65191));
        sim
    }

    #[test]
    fn arity_zero_is_usage_error() {
        let mut sim = connected_sim();
        let (_, out) = exec_line(&mut sim, "", "getState");
        assert!(out.starts_with("Wrong number of arguments!"));
        assert!(out.contains("Usage: getState <car> [timeoutms]"));
    }

    #[test]
    fn arity_too_many_is_usage_error() {
        let mut sim = connected_sim();
        let (_, out) = exec_line(&mut sim, "", "getState 1 500 9");
        assert!(out.starts_with("Wrong number of arguments!"));
    }

    #[test]
    fn prints_all_fields_in_order() {
        let mut sim = connected_sim();
        sim.set_state(CarState {
            fw_major: 12,
            fw_minor: 3,
            roll: 1.25,
            speed: -0.5,
            mc_fault: 2,
            ms_today: 43_200_000,
            ..Default::default()
        });
        let (flow, out) = exec_line(&mut sim, "", "getState 0");
        assert_eq!(flow, Flow::Continue);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 23);
        assert_eq!(lines[0], "FW_MAJOR: 12");
        assert_eq!(lines[1], "FW_MINOR: 3");
        assert_eq!(lines[2], "ROLL: 1.250000");
        assert_eq!(lines[5], "ACCEL: (0.000000 : 0.000000 : 0.000000)");
        assert_eq!(lines[10], "SPEED: -0.500000");
        assert_eq!(lines[13], "MC_FAULT: 2");
        assert_eq!(lines[19], "MS_TODAY: 43200000");
        assert_eq!(lines[22], "PY_UWB: 0.000000");
    }

    #[test]
    fn backend_failure_prints_fail() {
        // No connect -> the simulator reports failure.
        let mut sim = SimStation::new();
        let (flow, out) = exec_line(&mut sim, "", "getState 0 500");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(out, "Fail!\n");
    }

    #[test]
    fn rejects_non_numeric_car() {
        let mut sim = connected_sim();
        let (_, out) = exec_line(&mut sim, "", "getState abc");
        assert!(out.starts_with("Invalid number: 'abc'"));
        // Strict rejection: no state output follows.
        assert!(!out.contains("FW_MAJOR"));
    }

    #[test]
    fn printed_floats_reparse() {
        let mut sim = connected_sim();
        sim.set_state(CarState {
            px: 3.15625,
            ..Default::default()
        });
        let (_, out) = exec_line(&mut sim, "", "getState 0");
        let px_line = out.lines().find(|l| l.starts_with("PX: ")).unwrap();
        let value: f64 = px_line["PX: ".len()..].parse().unwrap();
        assert_eq!(value, 3.15625);
    }
}
