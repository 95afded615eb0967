//! Shell-script stand-ins for the Hugin tools.
//!
//! Each script echoes its name and arguments so the diagnostic log shows what
//! ran, then does just enough file work for the next step to find its inputs.

#![allow(dead_code)]

use std::path::Path;

/// Script body that only reports it ran.
pub const ECHO_ONLY: &str = r#"echo "$(basename "$0") $*""#;

/// Write an executable `#!/bin/sh` script called `name` into `dir`.
#[cfg(unix)]
pub fn write_tool(dir: &Path, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
}

/// Install the nine stitching tools.
///
/// `pto_gen` creates the project file, `nona` renders two TIFFs into the
/// working directory and `enblend` records its argv in `enblend-args.txt`
/// before writing the output.
#[cfg(unix)]
pub fn install_panorama_tools(dir: &Path) {
    write_tool(
        dir,
        "pto_gen",
        &format!("{ECHO_ONLY}\necho \"# hugin project\" > \"$2\""),
    );
    for name in [
        "cpfind",
        "cpclean",
        "linefind",
        "autooptimiser",
        "pano_modify",
        "hugin_executor",
    ] {
        write_tool(dir, name, ECHO_ONLY);
    }
    write_tool(
        dir,
        "nona",
        &format!("{ECHO_ONLY}\necho r0 > project0000.tif\necho r1 > project0001.tif"),
    );
    write_tool(
        dir,
        "enblend",
        &format!("{ECHO_ONLY}\nprintf '%s\\n' \"$@\" > enblend-args.txt\necho stitched > \"$2\""),
    );
}

/// Install the two blend tools.
///
/// `align_image_stack` writes `<prefix>0000.tif` and `<prefix>0001.tif`;
/// `enfuse` writes `a.tif` into the working directory.
#[cfg(unix)]
pub fn install_blend_tools(dir: &Path) {
    write_tool(
        dir,
        "align_image_stack",
        &format!("{ECHO_ONLY}\necho s0 > \"$4\"0000.tif\necho s1 > \"$4\"0001.tif"),
    );
    write_tool(dir, "enfuse", &format!("{ECHO_ONLY}\necho fused > a.tif"));
}
