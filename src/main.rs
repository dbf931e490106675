use std::error::Error;
use std::sync::Arc;

use clap::{arg, value_parser, ArgMatches, Command};
use p217::bigint::Limbs;
use p217::{plan_strategy, FieldConfig, Fp, Fp2, ModulusParameters, Plain, Preset, Strategy};

// Sample operands, least significant limb first.
const MONT_A: [u64; 4] = [0xf615317d451632e2, 0x7b86980a3cbe227c, 0x70bfb1110e18d841, 0x242c0d];
const ADD_A: [u64; 4] = [0xe16e8065786a34fb, 0xdda46b85ad1d2ca2, 0xfeab3ed59a76b177, 0x6ef3f5];
const ADD_B: [u64; 4] = [0xea079e48252fc8c0, 0x062c3c8f4f9724ca, 0xd6c14ce1c2a1a3ed, 0x0f2f40];
const SUB_A: [u64; 4] = [0x4c67a7817ca0e335, 0xac9c083a5b9bfecc, 0xee1b393cc1f5cf53, 0x67a8be];
const SUB_B: [u64; 4] = [0x24f1b658a54fb123, 0xbf17e254ef808cb5, 0x88c42fad340c02e5, 0x11d5061];
const MUL_A: [u64; 4] = [0x8d5c49d8375822e0, 0x2823d4be2a7ddcd6, 0xe5c42912b9e3c27f, 0x615fcf];
const MUL_B: [u64; 4] = [0xa7e08ad1522e877b, 0x0d00fbf124d15d66, 0x845426284bd86a9a, 0x7d5865];

const MONT2_A: [[u64; 4]; 2] = [
    [0xadcfe6472806bd58, 0x92f6d85c35d1a143, 0x018dcf0ee6f0551f, 0x16ad08],
    [0x417d57fed0871788, 0x1e6233e754764ff8, 0xab802688dd8f47bc, 0x108bb5d],
];
const ADD2_A: [[u64; 4]; 2] = [
    [0x9a705ca22edf4b30, 0xd6b1511a93efe6ab, 0xc4cb346720b44198, 0x29d3ef],
    [0x417d57fed0871788, 0x1e6233e754764ff8, 0xab802688dd8f47bc, 0x108bb5d],
];
const ADD2_B: [[u64; 4]; 2] = [
    [0x6c76bbc0db4b643a, 0xd3cbf0b6bcff65a2, 0xc914c967cd7b12d9, 0xbbbbf2],
    [0x9d88869695e962ef, 0xfe39051273bc65e0, 0x11d0fbb0042fb7c8, 0x272c68],
];
const SUB2_A: [[u64; 4]; 2] = [
    [0xc1f5be1f894863c9, 0x96290fa5da7df423, 0xe23a0cd3d0ef9856, 0xdd1a52],
    [0x1e38c7fa77d23c58, 0x1bf721c561f8b5bc, 0x456f26f28debe6b9, 0xcb4c40],
];
const SUB2_B: [[u64; 4]; 2] = [
    [0x5e1349a2f511dafc, 0x6b18f62cc4bf0bff, 0x90cc70de047f9686, 0xcd1612],
    [0x62d46363764f19d5, 0x6aba45499b26936e, 0x63e8d8c43582c0b8, 0x4f58ce],
];
const MUL2_A: [[u64; 4]; 2] = [
    [0xc45af956f825f396, 0xd8f62085d65f808c, 0xc6a5936b1f1ffebc, 0x8c97cb],
    [0x1e6284919d2a9847, 0x76ddb0a289f4c104, 0xdfc7cff76021f2e3, 0xa278f1],
];
const MUL2_B: [[u64; 4]; 2] = [
    [0x725c146e3eb2eaac, 0xe3eed80077fb50d5, 0xcfa10bdec2430fca, 0x5d4383],
    [0x00e79e2b75421708, 0x0a0ba6bbee78e2ee, 0x031b760dc852e15e, 0xcff610],
];

fn cli() -> Command {
    Command::new("p217")
        .about("p217 field arithmetic vectors and isogeny strategies")
        .version(env!("CARGO_PKG_VERSION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("vectors")
                .about("Print the GF(p) and GF(p^2) sample vectors as hex words")
                .arg(
                    arg!(--e2 <E2> "Exponent of 2 in the modulus")
                        .value_parser(value_parser!(u32))
                        .required(false),
                )
                .arg(
                    arg!(--e3 <E3> "Exponent of 3 in the modulus")
                        .value_parser(value_parser!(u32))
                        .required(false),
                ),
        )
        .subcommand(
            Command::new("strategy")
                .about("Compute an optimal isogeny-tree strategy")
                .arg(arg!([n] "Tree has n + 1 leaves").value_parser(value_parser!(usize)))
                .arg(arg!([cost_p] "Cost of one multiplication step").value_parser(value_parser!(u64)))
                .arg(arg!([cost_q] "Cost of one isogeny step").value_parser(value_parser!(u64)))
                .arg(
                    arg!(--preset <PRESET> "Use the p217 parameters of a party")
                        .value_parser(["alice", "bob"])
                        .required(false)
                        .conflicts_with_all(["n", "cost_p", "cost_q"]),
                ),
        )
}

fn field_config(matches: &ArgMatches) -> FieldConfig {
    let mut config = FieldConfig::default();
    if let Some(&e2) = matches.get_one::<u32>("e2") {
        config.e2 = e2;
    }
    if let Some(&e3) = matches.get_one::<u32>("e3") {
        config.e3 = e3;
    }
    config
}

fn element(params: &Arc<ModulusParameters>, limbs: &[u64]) -> Fp<Plain> {
    Fp::from_biguint(params, &Limbs::from_slice(limbs).to_biguint())
}

fn element2(params: &Arc<ModulusParameters>, limbs: &[[u64; 4]; 2]) -> Fp2<Plain> {
    Fp2::new(element(params, &limbs[0]), element(params, &limbs[1]))
}

fn print_fp(name: &str, value: &Fp<Plain>) { println!("{} := {:?}", name, value.limbs().to_hex_words()); }

fn print_fp2(name: &str, value: &Fp2<Plain>) {
    print_fp(&format!("{}_0", name), &value.c0);
    print_fp(&format!("{}_1", name), &value.c1);
}

fn print_vectors(params: &Arc<ModulusParameters>) {
    println!("p := {:?}", params.modulus_limbs().to_hex_words());

    println!("--------GF(p)------------");
    println!("--------Montgomery------------");
    let a = element(params, &MONT_A);
    print_fp("A", &a);
    println!("mont(A) := {:?}", a.to_montgomery().limbs().to_hex_words());

    for (title, symbol, lhs, rhs) in [
        ("Addition", "+", &ADD_A, &ADD_B),
        ("Subtraction", "-", &SUB_A, &SUB_B),
        ("Multiplication", "*", &MUL_A, &MUL_B),
    ] {
        println!("--------{}------------", title);
        let (a, b) = (element(params, lhs), element(params, rhs));
        print_fp("A", &a);
        print_fp("B", &b);
        let c = match symbol {
            "+" => &a + &b,
            "-" => &a - &b,
            _ => &a * &b,
        };
        print_fp(&format!("A{}B", symbol), &c);
    }

    println!("--------GF(p^2)------------");
    println!("--------Montgomery------------");
    let a = element2(params, &MONT2_A);
    print_fp2("A", &a);
    let mont = a.to_montgomery();
    println!("mont(A)_0 := {:?}", mont.c0.limbs().to_hex_words());
    println!("mont(A)_1 := {:?}", mont.c1.limbs().to_hex_words());

    for (title, symbol, lhs, rhs) in [
        ("Addition", "+", &ADD2_A, &ADD2_B),
        ("Subtraction", "-", &SUB2_A, &SUB2_B),
        ("Multiplication", "*", &MUL2_A, &MUL2_B),
    ] {
        println!("--------{}------------", title);
        let (a, b) = (element2(params, lhs), element2(params, rhs));
        print_fp2("A", &a);
        print_fp2("B", &b);
        let c = match symbol {
            "+" => &a + &b,
            "-" => &a - &b,
            _ => &a * &b,
        };
        print_fp2(&format!("A{}B", symbol), &c);
    }
}

fn strategy(matches: &ArgMatches) -> Result<(String, Strategy), Box<dyn Error>> {
    if let Some(preset) = matches.get_one::<String>("preset") {
        let preset: Preset = preset.parse()?;
        return Ok((preset.to_string(), preset.plan()?));
    }

    let (Some(&n), Some(&cost_p), Some(&cost_q)) = (
        matches.get_one::<usize>("n"),
        matches.get_one::<u64>("cost_p"),
        matches.get_one::<u64>("cost_q"),
    ) else {
        return Err("either --preset or all of <n> <cost_p> <cost_q> are required".into());
    };
    Ok(("strategy".to_string(), plan_strategy(n, cost_p, cost_q)?))
}

fn main() -> Result<(), Box<dyn Error>> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("vectors", sub_matches)) => {
            let params = Arc::new(field_config(sub_matches).derive()?);
            print_vectors(&params);
        }
        Some(("strategy", sub_matches)) => {
            let (name, strategy) = strategy(sub_matches)?;
            println!("{} {:?}", name, strategy.splits());
            println!("cost {} over {} leaves", strategy.cost(), strategy.leaves()?);
        }
        _ => unreachable!(),
    }

    Ok(())
}
