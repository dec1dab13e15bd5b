//! Minimal RESP server for integration tests.
//!
//! Understands just enough of the Redis protocol for the uploader: replies
//! `+PONG` to PING, records `AUTH` credentials and `SET`/`SETEX` writes, and
//! answers every other command with `+OK`. The first `fail_sets` writes are
//! answered with an error.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// One recorded SET: key, value, and any trailing options (e.g. `EX 60`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredWrite {
    pub key: String,
    pub value: Vec<u8>,
    pub options: Vec<String>,
}

#[derive(Default)]
struct State {
    fail_sets: usize,
    writes: Vec<StoredWrite>,
    auth: Vec<Vec<String>>,
}

/// Handle to a running server. The server runs until the process exits.
#[derive(Clone)]
pub struct FakeStore {
    pub port: u16,
    state: Arc<Mutex<State>>,
}

impl FakeStore {
    pub fn writes(&self) -> Vec<StoredWrite> {
        self.state.lock().unwrap().writes.clone()
    }

    /// Arguments of every AUTH command received, in order.
    pub fn auth_calls(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().auth.clone()
    }

    pub fn remaining_failures(&self) -> usize {
        self.state.lock().unwrap().fail_sets
    }
}

/// Starts a server in a background thread that rejects the first `fail_sets` writes.
pub fn start(fail_sets: usize) -> FakeStore {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let state = Arc::new(Mutex::new(State {
        fail_sets,
        ..State::default()
    }));
    let shared = Arc::clone(&state);
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            let state = Arc::clone(&shared);
            thread::spawn(move || {
                let _ = serve(stream, &state);
            });
        }
    });
    FakeStore { port, state }
}

fn serve(stream: TcpStream, state: &Mutex<State>) -> std::io::Result<()> {
    let mut out = stream.try_clone()?;
    let mut reader = BufReader::new(stream);
    while let Some(args) = read_command(&mut reader)? {
        let reply = handle(&args, state);
        out.write_all(reply.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

fn handle(args: &[Vec<u8>], state: &Mutex<State>) -> String {
    let Some(cmd) = args.first() else {
        return "-ERR empty command\r\n".into();
    };
    let text = |a: &Vec<u8>| String::from_utf8_lossy(a).into_owned();
    let write = match String::from_utf8_lossy(cmd).to_ascii_uppercase().as_str() {
        "PING" => return "+PONG\r\n".into(),
        "AUTH" => {
            let creds = args[1..].iter().map(text).collect();
            state.lock().unwrap().auth.push(creds);
            return "+OK\r\n".into();
        }
        "SET" if args.len() >= 3 => StoredWrite {
            key: text(&args[1]),
            value: args[2].clone(),
            options: args[3..].iter().map(text).collect(),
        },
        "SETEX" if args.len() == 4 => StoredWrite {
            key: text(&args[1]),
            value: args[3].clone(),
            options: vec!["EX".into(), text(&args[2])],
        },
        _ => return "+OK\r\n".into(),
    };
    let mut st = state.lock().unwrap();
    if st.fail_sets > 0 {
        st.fail_sets -= 1;
        return "-ERR simulated write failure\r\n".into();
    }
    st.writes.push(write);
    "+OK\r\n".into()
}

/// Reads one `*N` array of bulk strings. Returns None on EOF.
fn read_command<R: BufRead>(reader: &mut R) -> std::io::Result<Option<Vec<Vec<u8>>>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let count: usize = line
        .trim_end()
        .strip_prefix('*')
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidData, "expected array"))?;
    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line)?;
        let len: usize = line
            .trim_end()
            .strip_prefix('$')
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidData, "expected bulk"))?;
        let mut buf = vec![0u8; len + 2];
        reader.read_exact(&mut buf)?;
        buf.truncate(len);
        args.push(buf);
    }
    Ok(Some(args))
}
