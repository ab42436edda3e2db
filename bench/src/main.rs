use std::time::{Duration, Instant};

use anyhow::Context as _;
use serde_json::json;
use sha2::Digest as _;
use swblend::{
    BatchedBackend, BlendBackend, BufferView, BufferViewMut, FillDescriptor,
    ImageBlendDescriptor, MaskView, PixelFormat, Rgb888, RowThreading, ScalarBackend,
};

#[derive(Clone, Debug)]
struct BenchArgs {
    width: u32,
    height: u32,
    warmup: u32,
    repeats: u32,
    src: PixelFormat,
    dest: PixelFormat,
    opa: u8,
    masked: bool,
    parallel: bool,
    min_rows_per_band: usize,
}

#[derive(Clone, Debug)]
struct Inputs {
    dest: Vec<u8>,
    src: Vec<u8>,
    mask: Vec<u8>,
}

#[derive(Clone, Debug)]
struct RunReport {
    backend: &'static str,
    op: &'static str,
    samples: Vec<Duration>,
    digest: Option<String>,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.width == 0 || args.height == 0 {
        anyhow::bail!("--width/--height must be > 0");
    }
    if args.repeats == 0 {
        anyhow::bail!("--repeats must be > 0");
    }
    if args.parallel && args.min_rows_per_band == 0 {
        anyhow::bail!("--min-rows must be > 0");
    }

    let threading = if args.parallel {
        RowThreading::Parallel {
            min_rows_per_band: args.min_rows_per_band,
        }
    } else {
        RowThreading::Sequential
    };
    let backends: [Box<dyn BlendBackend>; 2] = [
        Box::new(ScalarBackend::new(threading)),
        Box::new(BatchedBackend::new(threading)),
    ];

    let inputs = make_inputs(&args);
    let mut reports = Vec::new();
    for backend in &backends {
        reports.push(run(&args, &inputs, backend.as_ref(), "fill")?);
        reports.push(run(&args, &inputs, backend.as_ref(), "image")?);
    }

    let mut parity = true;
    for op in ["fill", "image"] {
        let digests: Vec<&String> = reports
            .iter()
            .filter(|r| r.op == op)
            .filter_map(|r| r.digest.as_ref())
            .collect();
        if digests.windows(2).any(|w| w[0] != w[1]) {
            parity = false;
        }
    }

    let runs: Vec<serde_json::Value> = reports
        .iter()
        .map(|r| {
            json!({
                "backend": r.backend,
                "op": r.op,
                "supported": r.digest.is_some(),
                "sha256": r.digest,
                "p50_us": percentile_us(&r.samples, 0.50),
                "p90_us": percentile_us(&r.samples, 0.90),
                "p99_us": percentile_us(&r.samples, 0.99),
            })
        })
        .collect();

    let report = json!({
        "width": args.width,
        "height": args.height,
        "src": args.src,
        "dest": args.dest,
        "opa": args.opa,
        "masked": args.masked,
        "parallel": args.parallel,
        "repeats": args.repeats,
        "parity": parity,
        "runs": runs,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize bench report")?
    );

    if !parity {
        anyhow::bail!("backend outputs differ");
    }
    Ok(())
}

fn make_inputs(args: &BenchArgs) -> Inputs {
    let px = pixel_count(args.width, args.height);
    let fill = |n: usize, salt: u32| -> Vec<u8> {
        let mut x = 0x9E37_79B9u32 ^ salt;
        (0..n)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                (x >> 16) as u8
            })
            .collect()
    };
    Inputs {
        dest: fill(px * args.dest.bytes_per_pixel(), 1),
        src: fill(px * args.src.bytes_per_pixel(), 2),
        mask: fill(px, 3),
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn run(
    args: &BenchArgs,
    inputs: &Inputs,
    backend: &dyn BlendBackend,
    op: &'static str,
) -> anyhow::Result<RunReport> {
    let mut samples = Vec::with_capacity(args.repeats as usize);
    let mut digest = None;

    for i in 0..(args.warmup + args.repeats) {
        let mut dst = inputs.dest.clone();
        let dest = BufferViewMut::packed(&mut dst, args.width, args.height, args.dest)?;
        let mask = if args.masked {
            Some(MaskView::packed(&inputs.mask, args.width, args.height)?)
        } else {
            None
        };

        let t0 = Instant::now();
        let result = if op == "fill" {
            let mut desc = FillDescriptor::new(dest, Rgb888::new(200, 40, 90)).with_opa(args.opa);
            desc.mask = mask;
            backend.fill(&mut desc)
        } else {
            let src = BufferView::packed(&inputs.src, args.width, args.height, args.src)?;
            let mut desc = ImageBlendDescriptor::new(dest, src).with_opa(args.opa);
            desc.mask = mask;
            backend.blend_image(&mut desc)
        };
        let elapsed = t0.elapsed();

        match result {
            Ok(()) => {}
            Err(err) if err.is_unsupported() => {
                eprintln!("{} {op}: {err}", backend.name());
                break;
            }
            Err(err) => return Err(err).with_context(|| format!("{} {op}", backend.name())),
        }
        if i >= args.warmup {
            samples.push(elapsed);
        }
        digest = Some(sha256_hex(&dst));
    }

    Ok(RunReport {
        backend: backend.name(),
        op,
        samples,
        digest,
    })
}

fn percentile_us(samples: &[Duration], q: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
    Some(sorted[idx].as_secs_f64() * 1e6)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        width: 480,
        height: 272,
        warmup: 3,
        repeats: 50,
        src: PixelFormat::Argb8888,
        dest: PixelFormat::Rgb565,
        opa: 200,
        masked: false,
        parallel: false,
        min_rows_per_band: 16,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--width" => out.width = parse_u32(args.next(), "--width")?,
            "--height" => out.height = parse_u32(args.next(), "--height")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--opa" => {
                out.opa = u8::try_from(parse_u32(args.next(), "--opa")?)
                    .map_err(|_| anyhow::anyhow!("--opa must be 0..=255"))?
            }
            "--src" => out.src = parse_format(args.next(), "--src")?,
            "--dest" => out.dest = parse_format(args.next(), "--dest")?,
            "--min-rows" => out.min_rows_per_band = parse_usize(args.next(), "--min-rows")?,
            "--masked" => out.masked = true,
            "--parallel" => out.parallel = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"swblend-bench

Times fill and image blends on every backend and checks that their outputs match.

Options:
  --width N         region width (default 480)
  --height N        region height (default 272)
  --warmup N        untimed iterations (default 3)
  --repeats N       timed iterations (default 50)
  --src FORMAT      source format, e.g. argb8888, rgb565, l8 (default argb8888)
  --dest FORMAT     destination format: rgb565, rgb888, xrgb8888, a8 (default rgb565)
  --opa N           opacity 0..=255 (default 200)
  --masked          attach a random coverage mask
  --parallel        split rows across the rayon pool
  --min-rows N      smallest band per task in parallel mode (default 16)
"#
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("invalid value for {flag}: '{v}'"))
}

fn parse_usize(v: Option<String>, flag: &str) -> anyhow::Result<usize> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<usize>()
        .with_context(|| format!("invalid value for {flag}: '{v}'"))
}

fn parse_format(v: Option<String>, flag: &str) -> anyhow::Result<PixelFormat> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    serde_json::from_value(serde_json::Value::String(v.clone()))
        .with_context(|| format!("unknown pixel format for {flag}: '{v}'"))
}
