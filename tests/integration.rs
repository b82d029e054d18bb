use bandquant::{
    BAND_COUNT, Error, Image, MEDIANS, PixelArray, ProcessingOption, QuantizationTable, Session,
    Shape, process_image, quantize, reduce_bit_depth,
};

fn gradient(shape: Shape) -> Vec<u8> {
    (0..shape.sample_count()).map(|i| (i % 256) as u8).collect()
}

#[test]
fn quantize_matches_band_formula() {
    let data: Vec<u8> = (0..=255).collect();
    let image = Image::gray(&data, 256, 1).unwrap();
    let out = quantize(&image);

    for v in 0..=255usize {
        assert_eq!(out.as_slice()[v] as usize, 8 * (v / 8) + 4);
    }

    for (band, median) in MEDIANS.iter().enumerate() {
        assert!(out.as_slice().contains(median), "band {} median missing", band);
    }
}

#[test]
fn outputs_stay_in_median_set() {
    let shape = Shape::with_channels(40, 30, 3);
    let data = gradient(shape);
    let image = Image::new(&data, shape).unwrap();

    let out = process_image(&image, ProcessingOption::MedianQuantization);
    assert!(out.as_slice().iter().all(|v| MEDIANS.contains(v)));

    let out = process_image(&image, ProcessingOption::MedianQuantizationThenBitReduction);
    assert!(out.as_slice().iter().all(|v| (*v as usize) < BAND_COUNT));
}

#[test]
fn composition_equals_plain_shift() {
    let data: Vec<u8> = (0..=255).collect();
    let image = Image::gray(&data, 16, 16).unwrap();

    let composed = process_image(&image, ProcessingOption::MedianQuantizationThenBitReduction);
    let shifted = reduce_bit_depth(&image);
    assert_eq!(composed, shifted);

    // but the intermediate quantized image is distinct from both
    let quantized = quantize(&image);
    assert_ne!(quantized, shifted);
}

#[test]
fn rgba_channels_processed_independently() {
    let data = [3u8, 100, 200, 255, 16, 17, 18, 0];
    let image = Image::new(&data, Shape::with_channels(2, 1, 4)).unwrap();

    let out = quantize(&image);
    assert_eq!(out.as_slice(), &[4, 100, 204, 252, 20, 20, 20, 4]);
    assert_eq!(out.shape(), Shape::with_channels(2, 1, 4));
}

#[test]
fn table_agrees_with_transform() {
    let table = QuantizationTable;
    let data: Vec<u8> = (0..=255).collect();
    let image = Image::gray(&data, 256, 1).unwrap();
    let out = quantize(&image);

    for (v, q) in data.iter().zip(out.as_slice()) {
        assert_eq!(table.median(table.band_of(*v)), Some(*q));
    }
}

#[test]
fn session_workflow() {
    let mut session = Session::new();
    assert_eq!(session.process(), Err(Error::MissingInput));

    let shape = Shape::gray(8, 8);
    session.load(PixelArray::new(gradient(shape), shape).unwrap());
    assert_eq!(session.process(), Err(Error::InvalidOption(0)));

    assert_eq!(session.select_option(3), Err(Error::InvalidOption(3)));
    assert_eq!(session.process(), Err(Error::InvalidOption(0)));

    session.select_option(1).unwrap();
    let out = session.process().unwrap();
    assert_eq!(out.shape(), shape);
    assert_eq!(out.as_slice()[..9], [4, 4, 4, 4, 4, 4, 4, 4, 12]);
}

#[test]
fn malformed_input_rejected() {
    let data = [0u8; 5];
    let err = Image::new(&data, Shape::with_channels(2, 1, 3)).unwrap_err();
    assert!(err.is_malformed_pixel_data());
    assert_eq!(err, Error::BufferTooSmall { expected: 6, actual: 5 });
}
