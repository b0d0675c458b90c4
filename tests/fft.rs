mod common;

use common::*;
use fftwtools::fft::{fft, fft_inplace, fft_vec, ifft_normalized};
use fftwtools::{Complex64, Direction, FftError};

#[test]
fn impulse_roundtrip_scales_by_n() {
    let mut input = vec![
        Complex64::new(1.0, 0.0),
        Complex64::zero(),
        Complex64::zero(),
        Complex64::zero(),
    ];
    let mut freq = vec![Complex64::zero(); 4];
    fft(&mut input, &mut freq, Direction::Forward).unwrap();
    let mut back = vec![Complex64::zero(); 4];
    fft(&mut freq, &mut back, Direction::Backward).unwrap();
    let expected = [
        Complex64::new(4.0, 0.0),
        Complex64::zero(),
        Complex64::zero(),
        Complex64::zero(),
    ];
    assert_close(&back, &expected, 1e-12);
}

#[test]
fn matches_rustfft_forward_and_backward() {
    init_logging();
    for &n in &[1usize, 2, 3, 7, 16, 30, 97, 256] {
        let signal = random_complex(n, n as u64);
        for inverse in [false, true] {
            let mut input = signal.clone();
            let mut output = vec![Complex64::zero(); n];
            fft(&mut input, &mut output, Direction::from_inverse(inverse)).unwrap();
            let expected = reference_fft(&signal, inverse);
            assert_close(&output, &expected, 1e-9 * n as f64);
        }
    }
}

#[test]
fn in_place_matches_out_of_place() {
    let signal = random_complex(48, 7);
    let mut input = signal.clone();
    let mut output = vec![Complex64::zero(); 48];
    fft(&mut input, &mut output, Direction::Forward).unwrap();
    let mut data = signal.clone();
    fft_inplace(&mut data, Direction::Forward).unwrap();
    assert_close(&data, &output, 1e-9);
}

#[test]
fn fft_vec_leaves_input_alone() {
    let signal = random_complex(12, 3);
    let copy = signal.clone();
    let out = fft_vec(&signal).unwrap();
    assert_eq!(signal, copy);
    assert_close(&out, &reference_fft(&signal, false), 1e-9);
}

#[test]
fn normalized_inverse_recovers_signal() {
    let signal = random_complex(100, 11);
    let mut data = fft_vec(&signal).unwrap();
    ifft_normalized(&mut data).unwrap();
    assert_close(&data, &signal, 1e-9);
}

// Zero-length input should error before reaching FFTW.
#[test]
fn zero_length_errors() {
    let mut data: Vec<Complex64> = vec![];
    assert_eq!(
        fft_inplace(&mut data, Direction::Forward),
        Err(FftError::EmptyInput)
    );
}
