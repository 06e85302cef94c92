#![allow(non_snake_case)]

mod util;
use util::core_cycles;

use p224::p224::Point;

fn bench_mulgen() -> (f64, u8) {
    let z = core_cycles();
    let mut sb = [0u8; 28];
    sb[ 0.. 8].copy_from_slice(&z.to_le_bytes());
    sb[ 8..16].copy_from_slice(&z.to_le_bytes());
    sb[16..24].copy_from_slice(&z.to_le_bytes());
    sb[24..28].copy_from_slice(&(z as u32).to_le_bytes());
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..10 {
            let P = Point::mulgen(&sb);
            sb[0] = sb[0].wrapping_add(P.encode()[0] | 1);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 10.0, sb[0])
}

fn bench_mul() -> (f64, u8) {
    let z = core_cycles();
    let mut sb = [0u8; 28];
    sb[ 0.. 8].copy_from_slice(&z.to_le_bytes());
    sb[ 8..16].copy_from_slice(&z.to_le_bytes());
    sb[16..24].copy_from_slice(&z.to_le_bytes());
    sb[24..28].copy_from_slice(&(z as u32).to_le_bytes());
    let mut P = Point::mulgen(&sb);
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..10 {
            P.set_mul(&sb);
            sb[0] = sb[0].wrapping_add(P.encode()[0] | 1);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 10.0, sb[0])
}

fn bench_add() -> (f64, u8) {
    let z = core_cycles();
    let mut sb = [0u8; 28];
    sb[ 0.. 8].copy_from_slice(&z.to_le_bytes());
    sb[ 8..16].copy_from_slice(&z.to_le_bytes());
    sb[16..24].copy_from_slice(&z.to_le_bytes());
    sb[24..28].copy_from_slice(&(z as u32).to_le_bytes());
    let mut P = Point::mulgen(&sb);
    let Q = P.double();
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..100 {
            P += Q;
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 100.0, P.encode()[0])
}

fn bench_double() -> (f64, u8) {
    let z = core_cycles();
    let mut sb = [0u8; 28];
    sb[ 0.. 8].copy_from_slice(&z.to_le_bytes());
    sb[ 8..16].copy_from_slice(&z.to_le_bytes());
    sb[16..24].copy_from_slice(&z.to_le_bytes());
    sb[24..28].copy_from_slice(&(z as u32).to_le_bytes());
    let mut P = Point::mulgen(&sb);
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..100 {
            P.set_double();
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 100.0, P.encode()[0])
}

fn bench_decode() -> (f64, u8) {
    let z = core_cycles();
    let mut sb = [0u8; 28];
    sb[ 0.. 8].copy_from_slice(&z.to_le_bytes());
    sb[ 8..16].copy_from_slice(&z.to_le_bytes());
    sb[16..24].copy_from_slice(&z.to_le_bytes());
    sb[24..28].copy_from_slice(&(z as u32).to_le_bytes());
    let buf = Point::mulgen(&sb).encode();
    let mut P = Point::NEUTRAL;
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..100 {
            P.set_decode(&buf);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 100.0, P.encode()[0])
}

fn bench_encode() -> (f64, u8) {
    let z = core_cycles();
    let mut sb = [0u8; 28];
    sb[ 0.. 8].copy_from_slice(&z.to_le_bytes());
    sb[ 8..16].copy_from_slice(&z.to_le_bytes());
    sb[16..24].copy_from_slice(&z.to_le_bytes());
    sb[24..28].copy_from_slice(&(z as u32).to_le_bytes());
    let mut P = Point::mulgen(&sb);
    let Q = P.double();
    let mut x = 0u8;
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..100 {
            x ^= P.encode()[0];
            P += Q;
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 100.0, x)
}

fn main() {
    let mut bx = 0u8;

    let (v, x) = bench_add();
    bx ^= x;
    println!("P-224 point add:               {:13.2}", v);
    let (v, x) = bench_double();
    bx ^= x;
    println!("P-224 point double:            {:13.2}", v);
    let (v, x) = bench_mul();
    bx ^= x;
    println!("P-224 point mul:               {:13.2}", v);
    let (v, x) = bench_mulgen();
    bx ^= x;
    println!("P-224 point mulgen:            {:13.2}", v);
    let (v, x) = bench_decode();
    bx ^= x;
    println!("P-224 point decode:            {:13.2}", v);
    let (v, x) = bench_encode();
    bx ^= x;
    println!("P-224 point encode:            {:13.2}", v);

    println!("{}", bx);
}
