#![no_std]
#![no_main]

use defmt_rtt as _;
use embedded_hal::digital::StatefulOutputPin;
use panic_probe as _;
use rp_pico::{
    entry,
    hal::{
        self,
        fugit::{ExtU32, ExtU64},
        timer::{Alarm, Alarm0},
        Timer,
    },
};

use hal::{
    clocks::init_clocks_and_plls,
    pac::{self, interrupt},
    watchdog::Watchdog,
    Sio,
};

use melodier_client::{
    clock::TimerClock,
    speaker::{self, SharedSpeaker, Speaker},
    TIMER_RESOLUTION_US,
};
use melodier_core::{melodies, Clock, Sequencer};

// This can be static mut because it gets set once and only ever gets cloned
static mut TIMER: Option<Timer> = None;

// This can be static mut because it's set once and only ever accessed in the
// timer interrupt
static mut ALARM0: Option<Alarm0> = None;

/// Blink period of the on-board LED, standing in for the other work a real
/// application would do alongside playback
const HEARTBEAT_MS: u64 = 500;

#[entry]
fn main() -> ! {
    defmt::info!("Melodier Client v{}", env!("CARGO_PKG_VERSION"));

    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let sio = Sio::new(pac.SIO);

    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    /* Set up the timer */

    let mut timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    unsafe {
        TIMER = Some(timer);
    }

    /* Set up the speaker and LED pins */

    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let mut led_pin = pins.gpio25.into_push_pull_output();
    let output = SharedSpeaker::install(Speaker::new(pins.gpio15.reconfigure()));

    /* Set up the tone generator alarm */

    let mut alarm0 = timer.alarm_0().unwrap();

    alarm0.schedule(0u32.micros()).unwrap();
    alarm0.enable_interrupt();

    unsafe {
        ALARM0 = Some(alarm0);
        pac::NVIC::unmask(hal::pac::Interrupt::TIMER_IRQ_0);
    };

    defmt::info!("Started timer interrupt!");

    /* Play the startup chime, then loop the main melody */

    let clock = TimerClock::new(timer);
    let mut sequencer = Sequencer::new(output, clock);

    sequencer.begin();
    sequencer.play_once(&melodies::STARTUP);

    let mut last_heartbeat = clock.now_ms();

    loop {
        sequencer.update();

        // The looped melody never stops on its own, so this only fires once
        if !sequencer.is_playing() {
            defmt::info!("Startup chime finished, looping melody");
            sequencer.play(&melodies::TWINKLE, 0);
        }

        let now = clock.now_ms();

        if now - last_heartbeat >= HEARTBEAT_MS {
            led_pin.toggle().unwrap();
            last_heartbeat = now;
        }
    }
}

#[interrupt]
fn TIMER_IRQ_0() {
    let alarm = unsafe { ALARM0.as_mut().unwrap() };
    let timer = unsafe { TIMER }.unwrap();

    let start_time = timer.get_counter();

    /* Advance the tone generator and drive the speaker pin */

    speaker::tick();

    /* Schedule the next alarm */

    let end_time = timer.get_counter();

    let elapsed_time = end_time - start_time;

    let time_to_next = TIMER_RESOLUTION_US
        .micros()
        .checked_sub(elapsed_time)
        .unwrap_or(0u64.micros());

    if time_to_next.is_zero() {
        defmt::error!(
            "TIMER_IRQ_0 overran alotted time (TIMER_RESOLUTION_US), total elapsed = {}µs",
            elapsed_time.to_micros(),
        );
    }

    alarm.clear_interrupt();
    alarm.schedule(time_to_next.try_into().unwrap()).unwrap();
    alarm.enable_interrupt();
}
