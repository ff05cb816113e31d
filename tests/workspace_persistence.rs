use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_with_args(args: &[&std::ffi::OsStr]) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_attendd");
    let mut child = Command::new(exe)
        .args(args)
        .args(["--scan-delay-min-secs", "0", "--scan-delay-max-secs", "0"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn attendd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn spawn_sidecar(workspace: &Path) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    spawn_with_args(&[std::ffi::OsStr::new("--workspace"), workspace.as_os_str()])
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("read collection");
    serde_json::from_str(&text).expect("parse collection")
}

#[test]
fn opening_empty_workspace_seeds_collections() {
    let workspace = temp_dir("attendd-ws-seed");
    let (mut child, mut stdin, mut reader) = spawn_sidecar(&workspace);

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health["students"], 0);
    assert_eq!(health["attendanceRecords"], 0);

    assert_eq!(read_json(&workspace.join("students.json")), json!({}));
    assert_eq!(read_json(&workspace.join("attendance.json")), json!({}));
    assert_eq!(
        read_json(&workspace.join("teachers.json")),
        json!({
            "teacher1": { "name": "Teacher 1", "classes": ["CSE", "CSE-AIML"] },
            "teacher2": { "name": "Teacher 2", "classes": ["CSE-DS"] }
        })
    );

    let teachers = request_ok(&mut stdin, &mut reader, "2", "teachers.list", json!({}));
    assert_eq!(teachers["teachers"][1]["id"], "teacher2");
    assert_eq!(teachers["teachers"][1]["classes"], json!(["CSE-DS"]));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn students_survive_a_restart_in_order() {
    let workspace = temp_dir("attendd-ws-restart");
    {
        let (mut child, mut stdin, mut reader) = spawn_sidecar(&workspace);
        for (i, roll) in ["30", "4", "120"].iter().enumerate() {
            let sid = format!("s{}", i);
            let _ = request_ok(&mut stdin, &mut reader, "a", "login.student", json!({ "sessionId": sid }));
            let _ = request_ok(
                &mut stdin,
                &mut reader,
                "b",
                "studentLogin.submit",
                json!({ "sessionId": sid, "name": format!("N{}", roll), "rollNumber": roll, "department": "CSE" }),
            );
        }
        drop(stdin);
        let _ = child.wait();
    }

    let (mut child, mut stdin, mut reader) = spawn_sidecar(&workspace);
    let listed = request_ok(&mut stdin, &mut reader, "1", "students.list", json!({ "department": "CSE" }));
    let rolls: Vec<&str> = listed["students"]
        .as_array()
        .expect("students")
        .iter()
        .filter_map(|s| s["rollNumber"].as_str())
        .collect();
    assert_eq!(rolls, vec!["30", "4", "120"]);

    let other = request_ok(&mut stdin, &mut reader, "2", "students.list", json!({ "department": "CSE-DS" }));
    assert_eq!(other["students"], json!([]));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn logo_presence_is_reported_on_every_render() {
    let workspace = temp_dir("attendd-ws-logo");
    let (mut child, mut stdin, mut reader) = spawn_sidecar(&workspace);

    let missing = request_ok(&mut stdin, &mut reader, "1", "session.open", json!({}));
    assert_eq!(missing["page"]["logo"]["found"], false);
    assert_eq!(
        missing["page"]["warnings"],
        json!(["Logo image not found. Please ensure 'mckvian_logo.jpeg' is in the same directory."])
    );

    std::fs::write(workspace.join("mckvian_logo.jpeg"), [0xffu8, 0xd8, 0xff]).expect("write logo");
    let found = request_ok(&mut stdin, &mut reader, "2", "login.teacher", json!({}));
    assert_eq!(found["page"]["logo"]["found"], true);
    assert_eq!(found["page"]["logo"]["sizeBytes"], 3);
    assert_eq!(found["page"]["warnings"], json!([]));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn store_errors_fail_the_request_not_the_process() {
    let workspace = temp_dir("attendd-ws-errors");
    let broken = temp_dir("attendd-ws-errors-broken");
    std::fs::write(broken.join("students.json"), "{ nope").expect("write broken");

    let (mut child, mut stdin, mut reader) = spawn_with_args(&[]);

    let no_ws = request(&mut stdin, &mut reader, "1", "login.student", json!({}));
    assert_eq!(no_ws["error"]["code"], "no_workspace");
    let page = request_ok(&mut stdin, &mut reader, "2", "session.open", json!({}));
    assert_eq!(page["page"]["page"], "login");

    let failed = request(
        &mut stdin,
        &mut reader,
        "3",
        "workspace.select",
        json!({ "path": broken.to_string_lossy() }),
    );
    assert_eq!(failed["error"]["code"], "store_load_failed");
    assert!(failed["error"]["message"]
        .as_str()
        .unwrap_or("")
        .contains("failed to parse"));

    writeln!(stdin, "this is not json").expect("write garbage");
    stdin.flush().expect("flush");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read bad_json reply");
    let reply: serde_json::Value = serde_json::from_str(line.trim()).expect("parse reply");
    assert_eq!(reply["error"]["code"], "bad_json");

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let health = request_ok(&mut stdin, &mut reader, "5", "health", json!({}));
    assert_eq!(
        health["workspacePath"].as_str(),
        Some(workspace.to_string_lossy().as_ref())
    );

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
    let _ = std::fs::remove_dir_all(broken);
}
