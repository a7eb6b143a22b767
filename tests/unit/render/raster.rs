use super::*;

#[test]
fn one_pixel_per_cell() {
    let intensity = Field2::from_rows(&[[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]).unwrap();
    let alpha = intensity.map(|v| v / 5.0);
    let img = render(&intensity, &alpha, Colormap::Jet, Interpolation::Gaussian).unwrap();
    assert_eq!(img.dimensions(), (3, 2));
}

#[test]
fn first_field_row_is_the_bottom_image_row() {
    let intensity = Field2::from_rows(&[[0.0, 0.0], [1.0, 1.0]]).unwrap();
    let alpha = intensity.clone();
    let img = render(&intensity, &alpha, Colormap::Gray, Interpolation::Nearest).unwrap();

    assert_eq!(img.get_pixel(0, 1).0, [0, 0, 0, 0]);
    assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
}

#[test]
fn alpha_field_drives_transparency() {
    let intensity = Field2::from_rows(&[[2.0, 2.0, 2.0]]).unwrap();
    let alpha = Field2::from_rows(&[[0.0, 0.5, 1.0]]).unwrap();
    let img = render(&intensity, &alpha, Colormap::Viridis, Interpolation::Nearest).unwrap();

    let alphas: Vec<u8> = img.pixels().map(|p| p.0[3]).collect();
    assert_eq!(alphas, vec![0, 128, 255]);
    // Constant intensity maps to the palette's low end.
    assert_eq!(&img.get_pixel(0, 0).0[..3], &Colormap::Viridis.sample(0.0));
}

#[test]
fn rejects_empty_and_mismatched_fields() {
    let empty = Field2::zeros(0, 3);
    assert!(render(&empty, &empty, Colormap::Jet, Interpolation::Nearest).is_err());

    let a = Field2::zeros(2, 2);
    let b = Field2::zeros(2, 3);
    assert!(matches!(
        render(&a, &b, Colormap::Jet, Interpolation::Nearest),
        Err(HeatError::InvalidInput(_))
    ));
}

#[test]
fn save_heatmap_overwrites_existing_file() {
    let dir = std::path::PathBuf::from("target").join("unit_raster");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("overwrite.png");
    std::fs::write(&path, b"stale").unwrap();

    let img = RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 4]));
    save_heatmap(&path, &img).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (4, 3));
}
