use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use md4sum::cli::{run, Options, Outcome};
use md4sum::crypto::hash::ed2k;

struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("md4sum-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn file(&self, name: &str, content: &[u8]) -> String {
        let path = self.dir.join(name);
        fs::write(&path, content).unwrap();
        path_string(&path)
    }

    fn missing(&self, name: &str) -> String {
        path_string(&self.dir.join(name))
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn path_string(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

fn exec(args: &[&str]) -> (Outcome, String, String) {
    exec_os(args.iter().map(OsString::from))
}

fn exec_os<I: IntoIterator<Item = OsString>>(args: I) -> (Outcome, String, String) {
    let argv = std::iter::once(OsString::from("md4sum")).chain(args);
    let opts = Options::try_parse_from(argv).unwrap();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = run(&opts, &mut out, &mut err);
    (
        outcome,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn generate_prints_bare_digests() {
    let scratch = Scratch::new("generate");
    let abc = scratch.file("abc.txt", b"abc");
    let empty = scratch.file("empty", b"");

    let (outcome, out, err) = exec(&[&abc, &empty]);
    assert_eq!(outcome, Outcome::Ok);
    assert_eq!(
        out,
        "a448017aaf21d8525fc10ae87aa6729d\n31d6cfe0d16ae931b73c59d7e0c089c0\n"
    );
    assert!(err.is_empty());
}

#[test]
fn generate_with_names() {
    let scratch = Scratch::new("names");
    let file = scratch.file("msg", b"message digest");

    let (outcome, out, _) = exec(&["-n", &file]);
    assert_eq!(outcome, Outcome::Ok);
    assert_eq!(out, format!("d9130a8164549fe818874806e1c7014b  {file}\n"));
}

#[test]
fn generate_ed2k_link_uses_basename() {
    let scratch = Scratch::new("ed2k");
    let file = scratch.file("abc.txt", b"abc");

    let (outcome, out, _) = exec(&["-e", &file]);
    assert_eq!(outcome, Outcome::Ok);
    assert_eq!(out, "ed2k://|file|abc.txt|3|a448017aaf21d8525fc10ae87aa6729d|\n");
}

#[test]
fn generate_ed2k_multi_block() {
    let scratch = Scratch::new("ed2k-multi");
    let data: Vec<u8> = (0..ed2k::BLOCK_SIZE + 10).map(|i| (i % 253) as u8).collect();
    let file = scratch.file("big.bin", &data);

    let expected = ed2k::Ed2k::oneshot(&data);
    assert_eq!(expected.blocks().len(), 2);

    let (outcome, out, _) = exec(&["-e", &file]);
    assert_eq!(outcome, Outcome::Ok);
    assert_eq!(out, format!("{}\n", expected.link("big.bin")));
}

#[test]
fn missing_input_is_reported_and_processing_continues() {
    let scratch = Scratch::new("missing");
    let missing = scratch.missing("nope");
    let present = scratch.file("abc", b"abc");

    let (outcome, out, err) = exec(&[&missing, &present]);
    assert_eq!(outcome, Outcome::Error);
    assert_eq!(outcome.code(), 3);
    assert_eq!(out, "a448017aaf21d8525fc10ae87aa6729d\n");
    assert!(err.starts_with("md4sum: Cannot open input file"), "{err}");
    assert!(err.contains("nope"), "{err}");
}

#[test]
fn check_succeeds_and_fails() {
    let scratch = Scratch::new("check");
    let good = scratch.file("good", b"abc");
    let bad = scratch.file("bad", b"abd");
    let manifest = scratch.file(
        "sums.md4",
        format!(
            "# generated by hand\n\
             a448017aaf21d8525fc10ae87aa6729d  {good}\n\
             A448017AAF21D8525FC10AE87AA6729D\t{bad}\n"
        )
        .as_bytes(),
    );

    let (outcome, out, err) = exec(&["-c", &manifest]);
    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(outcome.code(), 1);
    assert!(out.is_empty());
    assert!(err.contains(&format!("md4sum: MD4 check succeeded for '{good}'.")), "{err}");
    assert!(err.contains(&format!("md4sum: MD4 check failed for '{bad}'.")), "{err}");
}

#[test]
fn check_all_good() {
    let scratch = Scratch::new("check-good");
    let file = scratch.file("data", b"message digest");
    let manifest = scratch.file(
        "sums.md4",
        format!("d9130a8164549fe818874806e1c7014b  {file}\n\nffffffffffffffffffffffffffffffff  ignored\n").as_bytes(),
    );

    let (outcome, _, err) = exec(&["-c", &manifest]);
    assert_eq!(outcome, Outcome::Ok);
    assert_eq!(err.lines().count(), 1);
}

#[test]
fn check_ed2k_digests() {
    let scratch = Scratch::new("check-ed2k");
    let file = scratch.file("abc", b"abc");
    let manifest = scratch.file(
        "sums.ed2k",
        format!("a448017aaf21d8525fc10ae87aa6729d {file}\n").as_bytes(),
    );

    let (outcome, _, _) = exec(&["-c", "-e", &manifest]);
    assert_eq!(outcome, Outcome::Ok);
}

#[test]
fn check_malformed_manifest_is_a_hard_error() {
    let scratch = Scratch::new("check-malformed");
    let file = scratch.file("abc", b"abc");
    let manifest = scratch.file(
        "sums.md4",
        format!("a448017aaf21d8525fc10ae87aa6729d  {file}\nnot-a-digest  {file}\n").as_bytes(),
    );

    let (outcome, _, err) = exec(&["-c", &manifest]);
    assert_eq!(outcome, Outcome::Error);
    assert!(err.contains("succeeded"), "{err}");
    assert!(err.contains("not an MD4 message digest 'not-a-digest'"), "{err}");
}

#[test]
fn check_missing_manifest() {
    let scratch = Scratch::new("check-missing");
    let missing = scratch.missing("sums.md4");

    let (outcome, _, err) = exec(&["-c", &missing]);
    assert_eq!(outcome, Outcome::Error);
    assert!(err.starts_with("md4sum: Cannot open digest file"), "{err}");
}

#[test]
fn check_missing_listed_file_continues() {
    let scratch = Scratch::new("check-missing-entry");
    let missing = scratch.missing("gone");
    let file = scratch.file("abc", b"abc");
    let manifest = scratch.file(
        "sums.md4",
        format!(
            "31d6cfe0d16ae931b73c59d7e0c089c0  {missing}\n\
             a448017aaf21d8525fc10ae87aa6729d  {file}\n"
        )
        .as_bytes(),
    );

    let (outcome, _, err) = exec(&["-c", &manifest]);
    assert_eq!(outcome, Outcome::Error);
    assert!(err.contains("Cannot open input file"), "{err}");
    assert!(err.contains(&format!("MD4 check succeeded for '{file}'.")), "{err}");
}

#[cfg(unix)]
#[test]
fn non_utf8_file_names_are_hashed_and_checked() {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let scratch = Scratch::new("non-utf8");
    let path = scratch.dir.join(OsString::from_vec(b"f\xff.b".to_vec()));
    fs::write(&path, b"abc").unwrap();

    let (outcome, out, err) = exec_os([OsString::from("-n"), path.clone().into_os_string()]);
    assert_eq!(outcome, Outcome::Ok, "{err}");
    assert_eq!(
        out,
        format!("a448017aaf21d8525fc10ae87aa6729d  {}\n", path.display())
    );

    let (outcome, out, _) = exec_os([OsString::from("-e"), path.clone().into_os_string()]);
    assert_eq!(outcome, Outcome::Ok);
    assert_eq!(out, "ed2k://|file|f\u{fffd}.b|3|a448017aaf21d8525fc10ae87aa6729d|\n");

    let mut manifest = b"a448017aaf21d8525fc10ae87aa6729d  ".to_vec();
    manifest.extend_from_slice(path.as_os_str().as_bytes());
    manifest.push(b'\n');
    let manifest = scratch.file("sums.md4", &manifest);

    let (outcome, _, err) = exec(&["-c", &manifest]);
    assert_eq!(outcome, Outcome::Ok, "{err}");
    assert!(err.contains("MD4 check succeeded"), "{err}");
}
