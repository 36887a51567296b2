#[cfg(test)]
mod test {
    use crate::prelude::*;
    use crate::tests::toolkit::{assert_close, init_logger, valid_buffer};
    use crate::{invalid_solution, valid_solution};

    /*
     * Closed form (sum, sum of squares) formulation,
     * the streamed computation is expected to match it.
     */
    fn closed_form(samples: &[f64], reference: f64) -> (f64, f64, f64) {
        let n = samples.len() as f64;
        let sum = samples.iter().sum::<f64>();
        let sumsq = samples.iter().map(|x| x * x).sum::<f64>();
        let mean = sum / n;
        let std = if samples.len() > 1 {
            ((sumsq - 2.0 * sum * mean + mean * mean * n) / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        let rms = ((sumsq - 2.0 * sum * reference + reference * reference * n) / n).sqrt();
        (mean, std, rms)
    }

    #[test]
    fn empty_buffer() {
        let buffer = SolutionBuffer::default();
        for axis in Axis::ALL {
            assert!(compute_axis_stats(&buffer, axis, 0.0, SampleFilter::All).is_none());
        }
        let report = AccuracyReport::new(&buffer, ReferencePolicy::MeanOfValid, SampleFilter::All);
        assert_eq!(report, Ok(None));
    }

    #[test]
    fn empty_buffer_report_is_terminal() {
        let buffer = SolutionBuffer::default();
        for policy in [
            ReferencePolicy::FirstEpoch,
            ReferencePolicy::LastEpoch,
            ReferencePolicy::MeanOfValid,
            ReferencePolicy::Fixed(Vector3::new(1.0, 2.0, 3.0)),
        ] {
            for filter in [SampleFilter::All, SampleFilter::ValidOnly] {
                assert_eq!(
                    AccuracyReport::new(&buffer, policy, filter),
                    Ok(None),
                    "{} policy: empty buffer should not produce a report",
                    policy
                );
            }
        }
        let ctx = ProcessingContext::default();
        for policy in [ReferencePolicy::FirstEpoch, ReferencePolicy::LastEpoch] {
            assert_eq!(ctx.accuracy_report(policy, SampleFilter::All), Ok(None));
        }
    }

    #[test]
    fn single_solution() {
        let buffer = valid_buffer(&[(1.0, 2.0, 3.0)]);
        for axis in Axis::ALL {
            let metrics = compute_axis_stats(&buffer, axis, 0.0, SampleFilter::All).unwrap();
            assert_eq!(metrics.std_dev, 0.0, "{} axis: std_dev should be null", axis);
        }
    }

    #[test]
    fn solutions_at_reference() {
        let buffer = valid_buffer(&[(4.0, 5.0, 6.0); 10]);
        let report = AccuracyReport::new(&buffer, ReferencePolicy::LastEpoch, SampleFilter::All)
            .unwrap()
            .unwrap();
        for axis in Axis::ALL {
            let metrics = report.axis(axis);
            assert_eq!(metrics.rms, 0.0);
            assert_eq!(metrics.cep, 0.0);
            assert_eq!(metrics.std_dev, 0.0);
        }
        assert_eq!(report.rms_3d(), 0.0);
    }

    #[test]
    fn cep_ratio() {
        let buffer = valid_buffer(&[
            (1.0, -3.0, 100.25),
            (1.5, -2.0, 101.5),
            (0.75, -2.5, 99.0),
            (1.25, -4.0, 100.0),
        ]);
        for reference in [-10.0, 0.0, 1.0, 100.0] {
            for axis in Axis::ALL {
                let metrics =
                    compute_axis_stats(&buffer, axis, reference, SampleFilter::All).unwrap();
                assert_eq!(metrics.cep, metrics.rms / 1.2);
            }
        }
    }

    #[test]
    fn closed_form_equivalence() {
        init_logger();
        let positions = [
            (1234.1234, -567.5678, 89.9012),
            (1234.5678, -567.1234, 90.3456),
            (1233.9012, -566.0123, 89.5678),
            (1234.3456, -567.7890, 90.0123),
            (1234.0000, -567.4567, 89.7890),
        ];
        let buffer = valid_buffer(&positions);
        let reference = [1234.0, -567.5, 90.0];

        for axis in Axis::ALL {
            let samples = buffer
                .iter()
                .map(|sol| sol.position[axis.index()])
                .collect::<Vec<_>>();
            let (mean, std, rms) = closed_form(&samples, reference[axis.index()]);
            let metrics =
                compute_axis_stats(&buffer, axis, reference[axis.index()], SampleFilter::All)
                    .unwrap();
            assert_close(metrics.mean, mean, 1.0E-6, "mean");
            assert_close(metrics.std_dev, std, 1.0E-6, "std_dev");
            assert_close(metrics.rms, rms, 1.0E-6, "rms");
        }
    }

    #[test]
    fn small_sample_values() {
        // x = 1, 2, 3, 4 against reference 0
        let buffer = valid_buffer(&[
            (1.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
            (3.0, 0.0, 0.0),
            (4.0, 0.0, 0.0),
        ]);
        let metrics = compute_axis_stats(&buffer, Axis::X, 0.0, SampleFilter::All).unwrap();
        assert_eq!(metrics.mean, 2.5);
        assert_close(metrics.std_dev, (5.0_f64 / 3.0).sqrt(), 1.0E-12, "std_dev");
        assert_close(metrics.rms, 7.5_f64.sqrt(), 1.0E-12, "rms");
    }

    #[test]
    fn large_magnitudes() {
        // ECEF like magnitudes, where the closed form loses most of its precision
        let buffer = valid_buffer(&[
            (4.0E6 + 1.0, 0.0, 0.0),
            (4.0E6 + 2.0, 0.0, 0.0),
            (4.0E6 + 3.0, 0.0, 0.0),
            (4.0E6 + 4.0, 0.0, 0.0),
        ]);
        let metrics = compute_axis_stats(&buffer, Axis::X, 4.0E6, SampleFilter::All).unwrap();
        assert_close(metrics.mean, 4.0E6 + 2.5, 1.0E-9, "mean");
        assert_close(metrics.std_dev, (5.0_f64 / 3.0).sqrt(), 1.0E-9, "std_dev");
        assert_close(metrics.rms, 7.5_f64.sqrt(), 1.0E-9, "rms");
    }

    #[test]
    fn invalid_solutions_contribute() {
        let buffer = vec![
            valid_solution!(0.0, 1.0, 0.0, 0.0),
            invalid_solution!(1.0, 100.0, 0.0, 0.0),
            valid_solution!(2.0, 3.0, 0.0, 0.0),
        ]
        .into_iter()
        .collect::<SolutionBuffer>();

        let all = compute_axis_stats(&buffer, Axis::X, 0.0, SampleFilter::All).unwrap();
        assert_close(all.mean, 104.0 / 3.0, 1.0E-12, "mean (all)");

        let valid = compute_axis_stats(&buffer, Axis::X, 0.0, SampleFilter::ValidOnly).unwrap();
        assert_eq!(valid.mean, 2.0);
        assert_close(valid.rms, 5.0_f64.sqrt(), 1.0E-12, "rms (valid)");
    }

    #[test]
    fn valid_only_without_valid_solution() {
        let buffer = vec![invalid_solution!(0.0, 1.0, 2.0, 3.0)]
            .into_iter()
            .collect::<SolutionBuffer>();
        let report = AccuracyReport::new(
            &buffer,
            ReferencePolicy::MeanOfValid,
            SampleFilter::ValidOnly,
        );
        assert_eq!(report, Ok(None));
    }

    #[test]
    fn report() {
        let buffer = valid_buffer(&[(0.0, 0.0, 0.0), (3.0, 4.0, 12.0), (0.0, 0.0, 0.0)]);
        let reference = Vector3::new(0.0, 0.0, 0.0);
        let report = AccuracyReport::new(
            &buffer,
            ReferencePolicy::Fixed(reference),
            SampleFilter::All,
        )
        .unwrap()
        .unwrap();

        assert_eq!(report.reference, reference);
        assert_close(report.axis(Axis::X).rms, 3.0_f64.sqrt(), 1.0E-12, "rms x");
        assert_close(report.axis(Axis::Y).rms, (16.0_f64 / 3.0).sqrt(), 1.0E-12, "rms y");
        assert_close(report.rms_2d(), (25.0_f64 / 3.0).sqrt(), 1.0E-12, "rms 2d");
        assert_close(report.rms_3d(), (169.0_f64 / 3.0).sqrt(), 1.0E-12, "rms 3d");

        let text = report.to_string();
        assert!(text.starts_with("reference (fixed"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn report_propagates_reference_error() {
        let buffer = vec![invalid_solution!(0.0, 1.0, 2.0, 3.0)]
            .into_iter()
            .collect::<SolutionBuffer>();
        let report = AccuracyReport::new(&buffer, ReferencePolicy::FirstEpoch, SampleFilter::All);
        assert_eq!(report, Err(Error::NoValidSolution));
    }
}
