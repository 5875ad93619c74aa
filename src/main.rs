use clap::{arg, crate_version, Command};
use lutforge::containers::{csp, cube, threedl};
use lutforge::lut::{Kernel, LutGrid};
use lutforge::rgb::Rgb;
use lutforge::hald;

const RCH: &str = "unreachable was reached";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help = "Examples:
---------
Decode a HALD PNG to .cube:  `lutforge hald-decode -i identity64.png -o identity64.cube`
Sample a LUT at a point:     `lutforge sample -i grade.cube -r 0.5 -g 0.2 -b 0.8`";

    let kernels = ["linear", "bilinear", "trilinear", "tetrahedral"];

    let mut main_cmd = Command::new("lutforge")
        .about("Decode HALD CLUT images and sample 3D color-grading LUTs")
        .after_long_help(long_help)
        .version(crate_version!());

    main_cmd = main_cmd.subcommand(
        Command::new("hald-decode")
            .arg(arg!(-i --input <PATH> "HALD CLUT PNG path").required(true))
            .arg(arg!(-o --output <PATH> "output .cube path").required(true))
            .about("decode a HALD CLUT PNG into a .cube LUT"),
    );

    main_cmd = main_cmd.subcommand(
        Command::new("sample")
            .arg(arg!(-i --input <PATH> "LUT path (.png, .cube, .3dl, .csp)").required(true))
            .arg(arg!(--r <VALUE> "red input, 0..1").required(true))
            .arg(arg!(--g <VALUE> "green input, 0..1").required(true))
            .arg(arg!(--b <VALUE> "blue input, 0..1").required(true))
            .arg(
                arg!(-k --kernel <NAME> "interpolation kernel")
                    .value_parser(kernels)
                    .default_value("tetrahedral"),
            )
            .about("interpolate a LUT at one RGB point"),
    );

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("hald-decode") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let data = std::fs::read(path_in)?;
        let grid = hald::decode(&data)?;
        std::fs::write(path_out, cube::write(&grid))?;
    }

    if let Some(cmd) = matches.subcommand_matches("sample") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let r: f64 = cmd.get_one::<String>("r").expect(RCH).parse()?;
        let g: f64 = cmd.get_one::<String>("g").expect(RCH).parse()?;
        let b: f64 = cmd.get_one::<String>("b").expect(RCH).parse()?;
        let kernel = match cmd.get_one::<String>("kernel").expect(RCH).as_str() {
            "linear" => Kernel::Linear,
            "bilinear" => Kernel::Bilinear,
            "trilinear" => Kernel::Trilinear,
            "tetrahedral" => Kernel::Tetrahedral,
            other => {
                eprintln!("{other} not supported");
                return Err(Box::new(std::fmt::Error));
            }
        };

        let grid: LutGrid<f64> = load_grid(path_in)?;
        let out = kernel.sample(&grid, Rgb::new(r, g, b))?;
        println!("{} {} {}", out.r, out.g, out.b);
    }

    Ok(())
}

fn load_grid(path: &str) -> Result<LutGrid<f64>, Box<dyn std::error::Error>> {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match extension.as_str() {
        "png" => {
            let data = std::fs::read(path)?;
            Ok(hald::decode(&data)?)
        }
        "cube" => {
            let text = std::fs::read_to_string(path)?;
            Ok(cube::parse(&text)?)
        }
        "3dl" => {
            let text = std::fs::read_to_string(path)?;
            Ok(threedl::parse(&text)?)
        }
        "csp" => {
            let text = std::fs::read_to_string(path)?;
            Ok(csp::parse(&text)?.grid)
        }
        other => {
            eprintln!("unrecognized LUT file extension: {other}");
            Err(Box::new(std::fmt::Error))
        }
    }
}
